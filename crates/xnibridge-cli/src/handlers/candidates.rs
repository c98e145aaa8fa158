//! List registered bridge candidates.

use xnibridge_core::BridgeSelector;

/// Names of the candidates a default selector tries, in order.
pub fn candidate_names() -> Vec<&'static str> {
    BridgeSelector::new().candidate_names()
}

/// Execute the candidates command.
pub fn execute() {
    for name in candidate_names() {
        println!("{name}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xnibridge_core::XniBridge;

    #[test]
    fn test_builtin_candidate_listed() {
        assert_eq!(candidate_names(), vec![XniBridge::CANDIDATE]);
    }
}
