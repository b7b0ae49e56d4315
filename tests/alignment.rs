use sentinel::{Alignment, AlignmentValidator, MatchCandidate, ALIGNMENT_TOLERANCE_PX};

fn cand(x: usize, y: usize) -> MatchCandidate {
    MatchCandidate { x, y, score: 0.99 }
}

fn validator() -> AlignmentValidator {
    AlignmentValidator::new(24, 18, ALIGNMENT_TOLERANCE_PX)
}

#[test]
fn vertical_offsets_below_tolerance_align() {
    for dy in [0usize, 1, 7] {
        let result = validator().validate(&[cand(10, 20), cand(80, 20 + dy)]);
        assert!(result.is_aligned(), "dy={dy}");
    }
}

#[test]
fn vertical_offsets_at_or_above_tolerance_do_not_align() {
    for dy in [8usize, 9, 30] {
        let result = validator().validate(&[cand(10, 20), cand(80, 20 + dy)]);
        assert_eq!(result, Alignment::Unaligned, "dy={dy}");
    }
}

#[test]
fn right_instance_higher_than_left_is_measured_by_magnitude() {
    let v = validator();
    assert!(v.validate(&[cand(10, 27), cand(80, 20)]).is_aligned());
    assert!(!v.validate(&[cand(10, 28), cand(80, 20)]).is_aligned());
}

#[test]
fn extraction_order_does_not_matter() {
    let v = validator();
    let a = v.validate(&[cand(10, 20), cand(80, 25)]);
    let b = v.validate(&[cand(80, 25), cand(10, 20)]);
    assert_eq!(a, b);
    let distance = a.distance().unwrap();
    assert!((distance - (70.0f64.powi(2) + 25.0).sqrt()).abs() < 1e-9);
}

#[test]
fn candidate_count_other_than_two_is_unaligned() {
    let v = validator();
    assert_eq!(v.validate(&[]), Alignment::Unaligned);
    assert_eq!(v.validate(&[cand(1, 1)]), Alignment::Unaligned);
    assert_eq!(
        v.validate(&[cand(1, 1), cand(40, 1), cand(80, 1)]),
        Alignment::Unaligned
    );
    assert_eq!(Alignment::Unaligned.distance(), None);
}

#[test]
fn tolerance_is_configurable() {
    let tight = AlignmentValidator::new(24, 18, 1);
    assert!(tight.validate(&[cand(0, 5), cand(50, 5)]).is_aligned());
    assert!(!tight.validate(&[cand(0, 5), cand(50, 6)]).is_aligned());
}
