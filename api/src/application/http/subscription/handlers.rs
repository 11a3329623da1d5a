pub mod grant_subscription;
pub mod revoke_subscription;
