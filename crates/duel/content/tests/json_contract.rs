use duel_core::{BaseStats, BossKit, Combatant, run_match};
use serde_json::Value;

fn result_json() -> Value {
    let p1 = Combatant::boss("Alpha", BossKit::new(), BaseStats::new(80, 20, 5, 0, 5, 10));
    let p2 = Combatant::boss("Beta", BossKit::new(), BaseStats::new(80, 18, 5, 0, 5, 8));
    let result = run_match(p1, p2, 77).expect("valid match");
    serde_json::to_value(&result).expect("serializable")
}

#[test]
fn result_uses_camel_case_fields() {
    let json = result_json();
    let object = json.as_object().expect("object");
    for key in ["winnerName", "winnerSide", "turns", "reason", "steps"] {
        assert!(object.contains_key(key), "missing {key}");
    }
    assert_eq!(json["reason"], "knockout");
    assert!(json["winnerSide"] == 1 || json["winnerSide"] == 2);
}

#[test]
fn steps_carry_the_viewer_field_names() {
    let json = result_json();
    let steps = json["steps"].as_array().expect("steps array");
    assert_eq!(steps[0]["phase"], "intro");
    assert_eq!(steps[1]["phase"], "turn_start");
    assert_eq!(steps[1]["logs"][0], "--- Tour 1 ---");
    assert_eq!(steps.last().expect("victory")["phase"], "victory");

    for step in steps {
        let step = step.as_object().expect("step object");
        for key in ["phase", "actor", "logs", "p1HP", "p2HP"] {
            assert!(step.contains_key(key), "missing {key}");
        }
        // zero shields are omitted
        assert!(!step.contains_key("p1Shield"));
        assert!(!step.contains_key("p2Shield"));
    }
}

#[test]
fn result_round_trips_through_json() {
    let p1 = Combatant::boss("Alpha", BossKit::new(), BaseStats::new(80, 20, 5, 0, 5, 10));
    let p2 = Combatant::boss("Beta", BossKit::new(), BaseStats::new(80, 18, 5, 0, 5, 8));
    let result = run_match(p1, p2, 77).expect("valid match");
    let text = serde_json::to_string(&result).expect("serializable");
    let back: duel_core::MatchResult = serde_json::from_str(&text).expect("deserializable");
    assert_eq!(back.digest(), result.digest());
}
