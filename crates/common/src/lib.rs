pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health::ok();
        assert_eq!(h.status, "ok");
        assert_eq!(h.database, "connected");
    }

    #[test]
    fn health_type_degraded() {
        let h = types::Health::degraded();
        assert_eq!(h.status, "degraded");
        assert_eq!(h.database, "unreachable");
    }
}
