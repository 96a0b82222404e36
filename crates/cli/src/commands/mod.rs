pub(crate) mod analytics;
pub(crate) mod keys;
pub(crate) mod onboarding;
