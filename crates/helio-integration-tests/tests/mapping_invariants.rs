//! Property tests for the reconciler's output invariants.
//!
//! Whatever the inputs look like, every discovered panel must land in
//! exactly one category, assigned plus empty must cover the topology, and
//! recomputation must be a pure function of content.

use std::collections::BTreeMap;

use helio_reconcile::{compute_mapping, DiscoveredPanel, MatchSource, Translation, TranslationTable};
use helio_topology::{DeviceConfig, SlotLabel, StringConfig, StringName, Topology};
use proptest::prelude::*;

const STRING_POOL: [&str; 4] = ["A", "B", "C", "AA"];

fn arb_topology() -> impl Strategy<Value = Topology> {
    (
        proptest::sample::subsequence(STRING_POOL.to_vec(), 1..=STRING_POOL.len()),
        proptest::collection::vec(1u32..6, STRING_POOL.len()),
    )
        .prop_map(|(names, counts)| Topology {
            devices: vec![DeviceConfig {
                name: "dev".into(),
                strings: names
                    .iter()
                    .zip(&counts)
                    .map(|(name, &panel_count)| StringConfig {
                        name: StringName::new(name).unwrap(),
                        panel_count,
                    })
                    .collect(),
            }],
        })
}

fn arb_label() -> impl Strategy<Value = String> {
    prop_oneof![
        // Labels in slot shape, valid or out of range.
        (0..STRING_POOL.len(), 0u32..9)
            .prop_map(|(i, p)| format!("{}{}", STRING_POOL[i], p)),
        // Garbage the parser rejects.
        proptest::sample::select(vec![
            "".to_string(),
            "1A".to_string(),
            "panel-3".to_string(),
            "???".to_string(),
            "Z".to_string(),
        ]),
    ]
}

fn arb_discovered() -> impl Strategy<Value = BTreeMap<String, DiscoveredPanel>> {
    proptest::collection::btree_map("SN[0-9]{3}", arb_label(), 0..12).prop_map(|serials| {
        serials
            .into_iter()
            .map(|(serial, label)| {
                let panel = DiscoveredPanel::discovered(
                    serial.clone(),
                    "dev",
                    label,
                    "2026-08-01T00:00:00Z",
                );
                (serial, panel)
            })
            .collect()
    })
}

fn arb_translations() -> impl Strategy<Value = TranslationTable> {
    proptest::collection::vec(
        (arb_label(), prop_oneof![
            Just(None::<SlotLabel>),
            (0..STRING_POOL.len(), 1u32..6).prop_map(|(i, p)| {
                Some(format!("{}{}", STRING_POOL[i], p).parse::<SlotLabel>().unwrap())
            }),
        ]),
        0..6,
    )
    .prop_map(|entries| {
        let mut table = TranslationTable::new();
        for (label, target) in entries {
            match target {
                Some(slot) => table.assign(label, slot),
                None => table.unassign(label),
            }
        }
        table
    })
}

proptest! {
    #[test]
    fn every_panel_lands_in_exactly_one_category(
        topology in arb_topology(),
        discovered in arb_discovered(),
        translations in arb_translations(),
    ) {
        prop_assume!(topology.validate().is_ok());
        let result = compute_mapping(&discovered, &topology, &translations);

        for serial in discovered.keys() {
            let in_assigned = result.assigned.values().filter(|a| &a.panel.serial == serial).count();
            let in_excess = result
                .excess
                .values()
                .flatten()
                .filter(|e| &e.panel.serial == serial)
                .count();
            let in_unassigned = result.unassigned.iter().filter(|p| &p.serial == serial).count();
            prop_assert_eq!(
                in_assigned + in_excess + in_unassigned,
                1,
                "serial {} appears {} times",
                serial,
                in_assigned + in_excess + in_unassigned
            );
        }
    }

    #[test]
    fn assigned_plus_empty_covers_the_topology(
        topology in arb_topology(),
        discovered in arb_discovered(),
        translations in arb_translations(),
    ) {
        prop_assume!(topology.validate().is_ok());
        let result = compute_mapping(&discovered, &topology, &translations);

        prop_assert_eq!(
            result.assigned.len() + result.empty_slots.len(),
            topology.total_slots()
        );
        // Assigned slots and empty slots are disjoint.
        for slot in &result.empty_slots {
            prop_assert!(!result.assigned.contains_key(slot));
        }
        // And every assigned slot is really declared.
        for slot in result.assigned.keys() {
            prop_assert!(topology.contains_slot(slot));
        }
    }

    #[test]
    fn recomputation_is_idempotent(
        topology in arb_topology(),
        discovered in arb_discovered(),
        translations in arb_translations(),
    ) {
        prop_assume!(topology.validate().is_ok());
        let first = compute_mapping(&discovered, &topology, &translations);
        let second = compute_mapping(&discovered, &topology, &translations);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn summary_always_matches_collections(
        topology in arb_topology(),
        discovered in arb_discovered(),
        translations in arb_translations(),
    ) {
        prop_assume!(topology.validate().is_ok());
        let result = compute_mapping(&discovered, &topology, &translations);
        let summary = result.summary;

        prop_assert_eq!(summary.total_slots, topology.total_slots());
        prop_assert_eq!(summary.empty, result.empty_slots.len());
        prop_assert_eq!(summary.excess, result.excess.values().map(Vec::len).sum::<usize>());
        prop_assert_eq!(summary.unassigned, result.unassigned.len());
        prop_assert_eq!(summary.auto_matched + summary.user_mapped, result.assigned.len());
    }

    #[test]
    fn user_mapped_assignments_are_backed_by_translations(
        topology in arb_topology(),
        discovered in arb_discovered(),
        translations in arb_translations(),
    ) {
        prop_assume!(topology.validate().is_ok());
        let result = compute_mapping(&discovered, &topology, &translations);

        for (slot, assigned) in &result.assigned {
            if assigned.source == MatchSource::UserMapped {
                prop_assert_eq!(
                    translations.get(&assigned.panel.raw_label),
                    Some(&Translation::Slot(slot.clone()))
                );
            }
        }
        // Explicitly unassigned panels never occupy a slot.
        for assigned in result.assigned.values() {
            let marked = translations
                .get(&assigned.panel.raw_label)
                .is_some_and(Translation::is_unassigned);
            prop_assert!(!marked);
        }
    }
}
