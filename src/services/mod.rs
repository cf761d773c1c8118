// Bookmark organizer services
// Stateless or single-purpose helpers used by the managers: validation,
// persistence, derived views, settings.

pub mod derived_views;
pub mod persistence;
pub mod settings_engine;
pub mod validator;
