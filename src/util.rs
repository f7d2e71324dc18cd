pub mod test {
    use rand::prelude::*;
    use serde_json::{Value, json};

    /// Endless stream of small snapshots keyed on `id` and `type`.
    ///
    /// Keys are drawn from a narrow range so consecutive snapshots overlap,
    /// and each snapshot is deduplicated on its key.
    pub fn create_test_records(seed: u64) -> impl Iterator<Item = Vec<Value>> {
        let mut rng = StdRng::seed_from_u64(seed);

        std::iter::repeat_with(move || {
            let len = rng.random_range(0..12);
            let mut seen = Vec::with_capacity(len);
            let mut records = Vec::with_capacity(len);
            for _ in 0..len {
                let key = (rng.random_range(0..5u32), rng.random_range(0..3u32));
                if seen.contains(&key) {
                    continue;
                }
                seen.push(key);
                records.push(json!({
                    "id": key.0,
                    "type": key.1,
                    "title": format!("t{}", rng.random_range(0..4u32)),
                }));
            }
            records
        })
    }

    /// One snapshot of `len` records with ids `0..len` and a random payload.
    pub fn create_large_snapshot(seed: u64, len: usize) -> Vec<Value> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut records = Vec::with_capacity(len);
        for id in 0..len {
            if rng.random_bool(0.9) {
                records.push(json!({ "id": id, "payload": rng.random::<u64>() }));
            }
        }
        records
    }
}
