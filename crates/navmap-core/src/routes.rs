//! Hash-fragment routes for SPA prerendering.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::GenerateError;

/// Prefix of every client-side route.
const ROUTE_PREFIX: &str = "/#/";

/// Map identifiers to `/#/<id>` routes, preserving order.
#[must_use]
pub fn build_routes(ids: &[String]) -> Vec<String> {
    ids.iter().map(|id| format!("{ROUTE_PREFIX}{id}")).collect()
}

/// Serialize routes as a JSON array indented with four spaces.
///
/// No trailing newline is written.
pub fn render_routes_json(routes: &[String]) -> Result<Vec<u8>, GenerateError> {
    let mut buf = Vec::with_capacity(routes.iter().map(|r| r.len() + 8).sum::<usize>() + 4);
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    routes.serialize(&mut serializer)?;
    Ok(buf)
}
