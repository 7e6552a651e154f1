use super::common::*;
use crate::compensation::allocation::{allocate, allocate_with, AllocationStrategy};
use crate::compensation::domain::{EngineError, Profession, ProfessionClass, Stakeholder};

#[test]
fn every_strategy_preserves_the_allocated_amount() {
    let rosters = [roster(), mixed_roster(), allied_roster()];
    let amounts = [0.0, 1.0 / 3.0, 1000.0, 98_765.4321];

    for stakeholders in &rosters {
        for strategy in AllocationStrategy::ordered() {
            for amount in amounts {
                let allocation = allocate(amount, stakeholders, strategy)
                    .unwrap_or_else(|err| panic!("{strategy} failed: {err}"));

                assert_eq!(allocation.len(), stakeholders.len());
                assert!(allocation.iter().all(|(_, share)| share >= 0.0));
                assert!(
                    (allocation.total() - amount).abs() <= TOLERANCE,
                    "{strategy} split {amount} into {}",
                    allocation.total()
                );
            }
        }
    }
}

#[test]
fn equal_strategy_gives_each_stakeholder_the_same_share() {
    let stakeholders = mixed_roster();

    let allocation = allocate(1000.0, &stakeholders, AllocationStrategy::Equal).expect("allocates");

    for stakeholder in &stakeholders {
        assert_eq!(allocation.share(&stakeholder.id), 1000.0 / 5.0);
    }
}

#[test]
fn presence_weighted_follows_full_time_equivalents() {
    let allocation =
        allocate(1000.0, &roster(), AllocationStrategy::PresenceWeighted).expect("allocates");

    assert_close(allocation.share(&sid("dr-a")), 500.0);
    assert_close(allocation.share(&sid("dr-b")), 250.0);
    assert_close(allocation.share(&sid("nurse-c")), 250.0);
}

#[test]
fn weight_based_follows_distribution_weights() {
    let stakeholders = mixed_roster();
    let weight_sum: f64 = stakeholders.iter().map(|s| s.weight).sum();

    let allocation =
        allocate(900.0, &stakeholders, AllocationStrategy::WeightBased).expect("allocates");

    assert_close(allocation.share(&sid("physio-d")), 900.0 * 2.5 / weight_sum);
    assert_close(allocation.share(&sid("midwife-e")), 900.0 * 0.5 / weight_sum);
    assert_close(allocation.share(&sid("dr-a")), 900.0 / weight_sum);
}

#[test]
fn clinical_only_excludes_allied_health_members() {
    let stakeholders = mixed_roster();
    let clinical = stakeholders
        .iter()
        .filter(|s| s.class() == ProfessionClass::Clinical)
        .count();

    let allocation =
        allocate(600.0, &stakeholders, AllocationStrategy::ClinicalOnly).expect("allocates");

    assert_eq!(clinical, 3);
    assert_close(allocation.share(&sid("dr-a")), 200.0);
    assert_close(allocation.share(&sid("midwife-e")), 200.0);
    assert_eq!(allocation.share(&sid("nurse-c")), 0.0);
    assert_eq!(allocation.share(&sid("physio-d")), 0.0);
    assert_eq!(allocation.len(), stakeholders.len());
}

#[test]
fn allied_only_splits_among_allied_members() {
    let allocation =
        allocate(500.0, &mixed_roster(), AllocationStrategy::AlliedOnly).expect("allocates");

    assert_close(allocation.share(&sid("nurse-c")), 250.0);
    assert_close(allocation.share(&sid("physio-d")), 250.0);
    assert_eq!(allocation.share(&sid("dr-b")), 0.0);
}

#[test]
fn empty_profession_subset_falls_back_to_everyone() {
    let clinical_only =
        allocate(300.0, &allied_roster(), AllocationStrategy::ClinicalOnly).expect("falls back");
    assert_close(clinical_only.share(&sid("nurse-1")), 150.0);
    assert_close(clinical_only.share(&sid("physio-2")), 150.0);

    let physicians = vec![physician("dr-x", 10, 1.0), physician("dr-y", 20, 1.0)];
    let allied_only =
        allocate(300.0, &physicians, AllocationStrategy::AlliedOnly).expect("falls back");
    assert_close(allied_only.share(&sid("dr-x")), 150.0);
}

#[test]
fn zero_weight_sum_fails_explicitly() {
    let absent = vec![
        member("a", Profession::Nurse, 0.0),
        member("b", Profession::Dentist, 0.0),
    ];
    assert_eq!(
        allocate(100.0, &absent, AllocationStrategy::PresenceWeighted),
        Err(EngineError::ZeroWeightSum {
            strategy: "presence-weighted"
        })
    );

    let unweighted: Vec<Stakeholder> = roster()
        .into_iter()
        .map(|s| Stakeholder { weight: 0.0, ..s })
        .collect();
    assert!(matches!(
        allocate(100.0, &unweighted, AllocationStrategy::WeightBased),
        Err(EngineError::ZeroWeightSum { .. })
    ));
}

#[test]
fn empty_stakeholder_set_is_rejected() {
    for strategy in AllocationStrategy::ordered() {
        assert_eq!(
            allocate(10.0, &[], strategy),
            Err(EngineError::EmptyStakeholderSet)
        );
    }
}

#[test]
fn invalid_amounts_and_weights_are_rejected_not_clamped() {
    let stakeholders = roster();
    for amount in [-1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            allocate(amount, &stakeholders, AllocationStrategy::Equal),
            Err(EngineError::InvalidInput { .. })
        ));
    }

    let mut negative_weight = roster();
    negative_weight[1].weight = -2.0;
    assert!(matches!(
        allocate(10.0, &negative_weight, AllocationStrategy::Equal),
        Err(EngineError::InvalidInput { field, .. }) if field.contains("dr-b")
    ));

    let mut over_full_time = roster();
    over_full_time[0].presence = 1.5;
    assert!(allocate(10.0, &over_full_time, AllocationStrategy::PresenceWeighted).is_err());

    let mut duplicated = roster();
    duplicated.push(physician("dr-a", 0, 1.0));
    assert!(allocate(10.0, &duplicated, AllocationStrategy::Equal).is_err());
}

#[test]
fn strategy_identifiers_parse_strictly() {
    assert_eq!(
        "presence-weighted".parse::<AllocationStrategy>(),
        Ok(AllocationStrategy::PresenceWeighted)
    );
    assert_eq!(
        " Clinical_Only ".parse::<AllocationStrategy>(),
        Ok(AllocationStrategy::ClinicalOnly)
    );
    assert_eq!(
        "custom".parse::<AllocationStrategy>(),
        Err(EngineError::InvalidStrategy("custom".to_string()))
    );
    assert!("seniority".parse::<AllocationStrategy>().is_err());

    for strategy in AllocationStrategy::ordered() {
        assert_eq!(strategy.key().parse::<AllocationStrategy>(), Ok(strategy));
    }
}

#[test]
fn caller_supplied_weights_drive_custom_allocation() {
    let stakeholders = roster();
    let by_panel = |s: &Stakeholder| f64::from(s.counted_patients());

    let allocation = allocate_with(1000.0, &stakeholders, by_panel).expect("allocates");

    assert_close(allocation.share(&sid("dr-a")), 600.0);
    assert_close(allocation.share(&sid("dr-b")), 400.0);
    assert_eq!(allocation.share(&sid("nurse-c")), 0.0);
    assert_eq!(
        allocation,
        allocate_with(1000.0, &stakeholders, by_panel).expect("deterministic")
    );

    assert!(allocate_with(1000.0, &stakeholders, |_| -1.0).is_err());
    assert!(matches!(
        allocate_with(1000.0, &stakeholders, |_| 0.0),
        Err(EngineError::ZeroWeightSum { strategy: "custom" })
    ));
}
