// ByteMap public API scenarios.
//
// Each test documents the behavior verified and the invariants it leans on:
// - Uniqueness: insert never overwrites; update upserts.
// - Count: len() equals the number of keys reachable by select.
// - Growth: entries survive every tier advance unchanged.
// - Ownership: owned values are copies, borrowed values are the caller's slice.
use kvmap::{decode_u64, encode_u64, ByteMap, MapError};
use std::ops::ControlFlow;

// Test: insert/grow/delete walk-through from the smallest tier.
// Assumes: tier 0 has 3 buckets, so the inserts below cross growth.
// Verifies: all keys select before and after growth; delete removes only its key.
#[test]
fn small_tier_walkthrough() {
    let mut m = ByteMap::with_tier(0);
    let keys: [&[u8]; 5] = [b"a", b"b", b"c", b"d", b"e"];

    for (i, k) in keys[..4].iter().enumerate() {
        m.insert(k, &[i as u8]).unwrap();
    }
    for (i, k) in keys[..4].iter().enumerate() {
        assert_eq!(m.select(k), Ok(&[i as u8][..]));
    }

    m.insert(b"e", &[4]).unwrap();
    assert!(m.tier() > 0, "growth happened");
    for (i, k) in keys.iter().enumerate() {
        assert_eq!(m.select(k), Ok(&[i as u8][..]));
    }

    m.delete(b"c").unwrap();
    assert_eq!(m.select(b"c"), Err(MapError::NotFound));
    for (i, k) in keys.iter().enumerate().filter(|(_, k)| **k != b"c") {
        assert_eq!(m.select(k), Ok(&[i as u8][..]));
    }
    assert_eq!(m.len(), 4);
}

// Test: typed integer insert read back through the byte API.
// Verifies: keys and values are big-endian on the byte level.
#[test]
fn typed_integer_visible_through_byte_api() {
    let mut m = ByteMap::new();
    m.insert_u64_u64(42, 100).unwrap();
    let raw = m.select(&encode_u64(42)).unwrap();
    assert_eq!(raw, &100u64.to_be_bytes());
    assert_eq!(decode_u64(raw), Some(100));
}

// Test: many keys across several growth events.
// Assumes: 1_000 keys from tier 0 cross more than two ladder steps.
// Verifies: every key keeps its value; len matches.
#[test]
fn entries_survive_repeated_growth() {
    let mut m = ByteMap::new();
    let mut tiers_seen = vec![m.tier()];
    for i in 0u32..1_000 {
        m.insert(&i.to_le_bytes(), format!("v{i}").as_bytes()).unwrap();
        if *tiers_seen.last().unwrap() != m.tier() {
            tiers_seen.push(m.tier());
        }
    }
    assert!(tiers_seen.len() > 2, "expected several growth events: {tiers_seen:?}");
    assert_eq!(m.len(), 1_000);
    for i in 0u32..1_000 {
        assert_eq!(m.select(&i.to_le_bytes()), Ok(format!("v{i}").as_bytes()));
    }
}

// Test: count parity over interleaved inserts and deletes.
// Verifies: len equals the number of selectable keys; double delete is NotFound.
#[test]
fn count_matches_reachable_keys() {
    let mut m = ByteMap::new();
    for i in 0u8..64 {
        m.insert(&[i], &[i]).unwrap();
    }
    for i in (0u8..64).step_by(3) {
        m.delete(&[i]).unwrap();
        assert_eq!(m.delete(&[i]), Err(MapError::NotFound));
    }
    let reachable = (0u8..64).filter(|i| m.contains_key(&[*i])).count();
    assert_eq!(reachable, m.len());
    assert_eq!(m.iter().count(), m.len());
}

// Test: update on a never-inserted key.
// Verifies: behaves like insert, including the duplicate check afterward.
#[test]
fn update_is_upsert() {
    let mut m = ByteMap::new();
    m.update(b"fresh", b"1").unwrap();
    assert_eq!(m.select(b"fresh"), Ok(&b"1"[..]));
    assert_eq!(m.insert(b"fresh", b"2"), Err(MapError::DuplicateKey));
    m.update(b"fresh", b"3").unwrap();
    assert_eq!(m.select(b"fresh"), Ok(&b"3"[..]));
    assert_eq!(m.len(), 1);
}

// Test: borrowed values survive growth without being copied.
// Verifies: the slice returned after growth points at the caller's buffer.
#[test]
fn borrowed_values_survive_growth() {
    let payloads: Vec<Vec<u8>> = (0u8..50).map(|i| vec![i; 4]).collect();
    let mut m = ByteMap::new();
    for (i, p) in payloads.iter().enumerate() {
        m.insert_borrowed(&(i as u64).to_be_bytes(), p).unwrap();
    }
    assert!(m.tier() > 3);
    for (i, p) in payloads.iter().enumerate() {
        let got = m.select_u64(i as u64).unwrap();
        assert_eq!(got.as_ptr(), p.as_ptr());
    }
}

// Test: foreach early termination propagates the break value.
#[test]
fn foreach_finds_first_match() {
    let mut m = ByteMap::new();
    for i in 0u64..20 {
        m.insert_u64_u64(i, i * i).unwrap();
    }
    let found = m.foreach(|k, v| match decode_u64(v) {
        Some(81) => ControlFlow::Break(decode_u64(k)),
        _ => ControlFlow::Continue(()),
    });
    assert_eq!(found, ControlFlow::Break(Some(9)));
}

// Test: `for` loops over `&ByteMap`.
#[test]
fn borrowed_map_into_iter() {
    let mut m = ByteMap::new();
    m.insert(b"x", b"1").unwrap();
    m.insert(b"y", b"2").unwrap();
    let mut total = 0usize;
    for (_k, v) in &m {
        total += v.len();
    }
    assert_eq!(total, 2);
}

// Test: fallible construction reports the clamped tier.
#[test]
fn try_with_tier_clamps() {
    let m = ByteMap::try_with_tier(5).unwrap();
    assert_eq!(m.tier(), 5);
    assert_eq!(m.capacity(), kvmap::tiers::PRIME_CAPACITIES[5]);
}
