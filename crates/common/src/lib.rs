//! Cross-cutting helpers shared by every crate in the workspace:
//! logging setup, the bounded retry policy and wire-level response types.

pub mod retry;
pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok", db: false, time: "2024-01-01T00:00:00Z".into() };
        assert_eq!(h.status, "ok");
        assert!(!h.db);
    }
}
