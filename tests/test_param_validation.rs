use crf_train::train::LineSearchAlgorithm;
use crf_train::Trainer;

#[test]
fn test_c1_negative_validation() {
    let mut trainer = Trainer::new(false);

    let result = trainer.set("c1", "-1.0");
    assert!(result.is_err());
    assert_eq!(result.unwrap_err().to_string(), "c1 must be non-negative");

    assert!(trainer.set("c1", "0.0").is_ok());
    assert!(trainer.set("c1", "1.0").is_ok());
}

#[test]
fn test_c2_negative_validation() {
    let mut trainer = Trainer::new(false);

    let result = trainer.set("c2", "-1.0");
    assert!(result.is_err());
    assert_eq!(result.unwrap_err().to_string(), "c2 must be non-negative");

    assert!(trainer.set("c2", "0.0").is_ok());
    assert!(trainer.set("c2", "1e-3").is_ok());
}

#[test]
fn test_minfreq_validation() {
    let mut trainer = Trainer::new(false);

    let result = trainer.set("feature.minfreq", "-2");
    assert_eq!(
        result.unwrap_err().to_string(),
        "feature.minfreq must be non-negative"
    );
    assert!(trainer.set("feature.minfreq", "0").is_ok());
}

#[test]
fn test_epsilon_validation() {
    let mut trainer = Trainer::new(false);

    assert!(trainer.set("epsilon", "0.0").is_ok());
    let result = trainer.set("epsilon", "-0.001");
    assert_eq!(
        result.unwrap_err().to_string(),
        "epsilon must be non-negative"
    );
    assert!(trainer.set("epsilon", "1e-5").is_ok());
}

#[test]
fn test_linesearch_names() {
    let mut trainer = Trainer::new(false);

    trainer.set("linesearch", "BacktrackingArmijo").unwrap();
    assert_eq!(
        trainer.params().linesearch(),
        LineSearchAlgorithm::BacktrackingArmijo
    );
    assert!(trainer.set("linesearch", "Newton").is_err());
}

#[test]
fn test_invalid_parameter_values() {
    let mut trainer = Trainer::new(false);

    assert!(trainer.set("c1", "not_a_number").is_err());
    assert!(trainer.set("c2", "abc").is_err());
    assert!(trainer.set("max_iterations", "1.5").is_err());
    assert!(trainer.set("feature.possible_states", "maybe").is_err());
}

#[test]
fn test_unknown_parameter() {
    let mut trainer = Trainer::new(false);

    let result = trainer.set("unknown_param", "1.0");
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("unknown parameter"));
}

#[test]
fn test_num_memories_validation() {
    let mut trainer = Trainer::new(false);

    assert_eq!(trainer.get("num_memories").unwrap(), "6");
    let result = trainer.set("num_memories", "0");
    assert_eq!(
        result.unwrap_err().to_string(),
        "num_memories must be at least 1"
    );
    trainer.set("num_memories", "8").unwrap();
    assert_eq!(trainer.params().num_memories(), 8);
}
