use crate::domain::composition::entities::Category;

#[derive(Debug, Clone)]
pub struct AnalyzeCompositionInput {
    /// Typed label text or OCR output; `None` when extraction produced nothing.
    pub text_input: Option<String>,
    pub goal: String,
    pub category: Category,
    pub subtype: String,
    pub user_id: String,
}

/// Goal-sensitive classification tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRules {
    /// Lowercase substrings of the goal that mark a sensitive user.
    pub sensitivity_triggers: Vec<String>,
    /// `adverse_for` tags that turn a high-risk ingredient into a hard "avoid".
    pub strict_avoid_tags: Vec<String>,
    pub recommendations: Vec<String>,
}

impl ClassificationRules {
    /// Case-insensitive substring match of the goal against the triggers.
    pub fn goal_is_sensitive(&self, goal: &str) -> bool {
        let goal = goal.to_lowercase();
        self.sensitivity_triggers
            .iter()
            .any(|trigger| goal.contains(trigger.as_str()))
    }
}

impl Default for ClassificationRules {
    fn default() -> Self {
        let to_owned = |items: &[&str]| items.iter().map(|item| item.to_string()).collect();

        Self {
            // Stems, so inflected forms ("сухие", "сухая", "сухой") all match.
            sensitivity_triggers: to_owned(&[
                "чувствительн",
                "аллерг",
                "атопичн",
                "сух",
                "повреждён",
                "поврежден",
                "sensitive",
                "allerg",
                "atopic",
                "dry",
                "damaged",
            ]),
            strict_avoid_tags: to_owned(&[
                "чувствительная кожа",
                "сухие волосы",
                "повреждённые волосы",
                "sensitive skin",
                "dry hair",
                "damaged hair",
            ]),
            recommendations: to_owned(&[
                "Обращайте внимание на первые 5 компонентов: они составляют основу средства.",
                "Для вашей цели важнее функциональные ингредиенты (увлажнители, кератин, церамиды), а не наполнители.",
                "Если в составе есть спирты (Alcohol Denat., Ethanol), проверяйте их позицию: после 5-го места они обычно безопасны.",
            ]),
        }
    }
}
