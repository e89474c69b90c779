/// Shared-secret check guarding the word list view. Plaintext comparison,
/// not a security boundary.
#[derive(Clone, Debug)]
pub struct AdminGate {
    password: String,
}

impl AdminGate {
    pub fn new(password: &str) -> Self {
        Self {
            password: password.to_string(),
        }
    }

    pub fn check(&self, attempt: &str) -> bool {
        attempt == self.password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_only_exact_password() {
        let gate = AdminGate::new("admin");
        assert!(gate.check("admin"));
        assert!(!gate.check("Admin"));
        assert!(!gate.check("admin "));
        assert!(!gate.check(""));
    }
}
