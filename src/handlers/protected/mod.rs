// handlers/protected/mod.rs - Handlers that act on behalf of an identity
//
// The identity middleware runs for every route. Handlers forward the resolved
// `CurrentIdentity` to the notes service, which rejects anonymous callers.
pub mod notes;
