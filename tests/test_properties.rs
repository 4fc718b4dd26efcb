//! Property-based tests for palette generation, scoring, transpositions and pagination.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use shade_assessment::domain::Direction;
use shade_assessment::evaluator::{canonical_ids, is_correct};
use shade_assessment::pagination::{window, PageEntry, SizeClass};
use shade_assessment::palette::{
    build_swatches, generate, PaletteSeed, LIGHTNESS_GAP, MAX_LIGHTNESS, MAX_SWATCHES, MIN_LIGHTNESS,
};
use shade_assessment::session::Arrangement;

fn size_strategy() -> impl Strategy<Value = SizeClass> {
    prop_oneof![Just(SizeClass::Mobile), Just(SizeClass::Tablet), Just(SizeClass::Desktop)]
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::LightToDark), Just(Direction::DarkToLight)]
}

proptest! {
    // 1. Generated palettes form an arithmetic progression inside the lightness range
    #[test]
    fn palette_is_progression(seed in any::<u64>(), count in 1..=MAX_SWATCHES) {
        let mut rng = StdRng::seed_from_u64(seed);
        let items = generate(&mut rng, count);
        prop_assert_eq!(items.len(), count);

        let mut ls: Vec<u8> = items.iter().map(|s| s.lightness).collect();
        ls.sort_unstable();
        for w in ls.windows(2) {
            prop_assert_eq!(w[1] - w[0], LIGHTNESS_GAP);
        }
        prop_assert!(ls[0] >= MIN_LIGHTNESS);
        prop_assert!(ls[count - 1] <= MAX_LIGHTNESS);

        let hue = items[0].color.hue;
        let sat = items[0].color.saturation;
        prop_assert!(items.iter().all(|s| s.color.hue == hue && s.color.saturation == sat));
    }

    // 2. Shuffling is a permutation of the positional ids
    #[test]
    fn shuffle_is_permutation(seed in any::<u64>(), count in 1..=MAX_SWATCHES) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ids: Vec<String> = generate(&mut rng, count).into_iter().map(|s| s.id).collect();
        ids.sort();
        let mut expected: Vec<String> = (0..count).map(|i| format!("color-{i}")).collect();
        expected.sort();
        prop_assert_eq!(ids, expected);
    }

    // 3. Any adjacent swap away from canonical order scores false
    #[test]
    fn adjacent_swap_breaks_canonical(
        start in MIN_LIGHTNESS..=45u8,
        count in 2..=4usize,
        dir in direction_strategy(),
        pick in 0..3usize,
    ) {
        let items = build_swatches(PaletteSeed { hue: 10, saturation: 65.0, start }, count);
        let canonical = canonical_ids(&items, dir);
        prop_assert!(is_correct(&canonical, &canonical));
        let i = pick % (count - 1);
        let mut candidate = canonical.clone();
        candidate.swap(i, i + 1);
        prop_assert!(!is_correct(&candidate, &canonical));
    }

    // 4. A transposition changes exactly two positions and is an involution
    #[test]
    fn transposition_is_involution(n in 2..10usize, a in 0..10usize, b in 0..10usize) {
        let (a, b) = (a % n, b % n);
        prop_assume!(a != b);
        let labels: Vec<String> = (0..n).map(|i| format!("l{i}")).collect();
        let arr = Arrangement::Labels(labels.clone());

        let once = arr.transposed(&labels[a], &labels[b]).unwrap();
        let changed = once.ids().iter().zip(&labels).filter(|(x, y)| x != y).count();
        prop_assert_eq!(changed, 2);

        let twice = once.transposed(&labels[a], &labels[b]).unwrap();
        prop_assert_eq!(twice, arr);
    }

    // 5. Pagination keeps anchors, shows current, never doubles an elision
    #[test]
    fn pagination_contract(total in 1..60usize, current in 1..60usize, size in size_strategy()) {
        let current = current.min(total);
        let entries = window(total, current, size);

        prop_assert_eq!(entries.first(), Some(&PageEntry::Page(1)));
        prop_assert_eq!(entries.last(), Some(&PageEntry::Page(total)));
        prop_assert!(entries.windows(2).all(|w| !(w[0] == PageEntry::Ellipsis && w[1] == PageEntry::Ellipsis)));

        let pages: Vec<usize> = entries
            .iter()
            .filter_map(|e| match e { PageEntry::Page(n) => Some(*n), PageEntry::Ellipsis => None })
            .collect();
        prop_assert!(pages.windows(2).all(|w| w[0] < w[1]), "pages not increasing: {pages:?}");
        prop_assert!(pages.iter().any(|p| p.abs_diff(current) <= 1), "current {current} not near {pages:?}");
        if size == SizeClass::Desktop {
            prop_assert_eq!(pages.len(), total);
        }
    }
}

#[test]
fn end_to_end_known_palette() {
    let items = build_swatches(PaletteSeed { hue: 210, saturation: 70.0, start: 30 }, 4);
    let lightness: Vec<u8> = items.iter().map(|s| s.lightness).collect();
    assert_eq!(lightness, vec![30, 40, 50, 60]);

    let canonical = canonical_ids(&items, Direction::LightToDark);
    assert_eq!(canonical, vec!["color-3", "color-2", "color-1", "color-0"]);
    assert!(is_correct(&canonical, &canonical));

    for (i, j) in [(0, 2), (0, 3), (1, 3)] {
        let mut candidate = canonical.clone();
        candidate.swap(i, j);
        assert!(!is_correct(&candidate, &canonical));
    }
}
