/// Router Module Index
///
/// Splits the three endpoints by the access tier they belong to. The tiers are
/// documentation only: enforcement is done once, by the access middleware that
/// `create_router` layers over all of them using the ordered policy rules.

/// Routes open to anonymous callers.
pub mod public;

/// Routes for any caller holding the "user" or "admin" role.
pub mod authenticated;

/// Routes restricted to the "admin" role.
pub mod admin;
