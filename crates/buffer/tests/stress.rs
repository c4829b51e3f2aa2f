// Chunk: docs/chunks/text_store - Gap buffer text store with interval tracking

//! Randomized model tests: drive a `GapBuffer` and a plain `Vec<u8>`
//! through the same edit script and require them to agree, with fixed
//! seeds so failures replay.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tern_buffer::GapBuffer;

#[test]
fn random_edits_match_model() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut buffer = GapBuffer::new();
    let mut model: Vec<u8> = Vec::new();

    for step in 0..2000 {
        match rng.gen_range(0..10) {
            // Insert a short run at a random position.
            0..=5 => {
                let pos = rng.gen_range(0..=model.len());
                let count = rng.gen_range(1..8);
                let bytes: Vec<u8> =
                    (0..count).map(|_| rng.gen_range(b'a'..=b'z')).collect();
                buffer.insert(pos, &bytes);
                model.splice(pos..pos, bytes);
            }
            // Delete a random range.
            6..=8 => {
                if !model.is_empty() {
                    let begin = rng.gen_range(0..model.len());
                    let end = rng.gen_range(begin..=model.len().min(begin + 16));
                    buffer.delete_range(begin, end);
                    model.drain(begin..end);
                }
            }
            // Pure gap relocation.
            _ => {
                buffer.move_gap_to(rng.gen_range(0..=model.len()));
            }
        }

        assert_eq!(buffer.len(), model.len(), "step {step}");
        assert_eq!(buffer.contents(), model, "step {step}");
        if !model.is_empty() {
            let pos = rng.gen_range(0..model.len());
            assert_eq!(buffer.byte_at(pos), Some(model[pos]), "step {step}");
        }
    }
}

#[test]
fn find_rfind_match_linear_scan() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut model: Vec<u8> = Vec::new();
    for _ in 0..200 {
        if rng.gen_range(0..6) == 0 {
            model.push(b'\n');
        } else {
            model.push(rng.gen_range(b'a'..=b'e'));
        }
    }
    let mut buffer = GapBuffer::from_bytes(model.clone());

    for _ in 0..50 {
        buffer.move_gap_to(rng.gen_range(0..=model.len()));
        let needles = [b'\n', b'a', b'c', b'z'];
        let needle = needles[rng.gen_range(0..needles.len())];
        let from = rng.gen_range(0..=model.len());

        let expected = model[from..].iter().position(|&b| b == needle).map(|i| from + i);
        assert_eq!(buffer.find(needle, from), expected);

        let expected = model[..from].iter().rposition(|&b| b == needle);
        assert_eq!(buffer.rfind(needle, from), expected);
    }
}

#[test]
fn interval_untouched_by_surrounding_edits() {
    // Edits that never intersect the open interior of an interval leave
    // its content identical and its dirty flag clear, no matter how much
    // the surrounding text churns.
    let mut rng = StdRng::seed_from_u64(1234);
    let text = "the quick brown fox jumps over the lazy dog";
    let mut buffer = GapBuffer::from_str(text);
    let mut model: Vec<u8> = text.as_bytes().to_vec();
    let id = buffer.create_interval(16, 19); // "fox"
    let (mut begin, mut end) = (16usize, 19usize);

    for step in 0..500 {
        match rng.gen_range(0..8) {
            0..=3 => {
                // Insert outside [begin, end): at or left of begin, or at
                // or right of end.
                let pos = if rng.gen_bool(0.5) {
                    rng.gen_range(0..=begin)
                } else {
                    rng.gen_range(end..=model.len())
                };
                let bytes: Vec<u8> = (0..rng.gen_range(1..5))
                    .map(|_| rng.gen_range(b'a'..=b'z'))
                    .collect();
                let count = bytes.len();
                buffer.insert(pos, &bytes);
                model.splice(pos..pos, bytes);
                if pos <= begin {
                    begin += count;
                    end += count;
                }
            }
            4..=6 => {
                // Delete a range entirely left of begin or right of end.
                let (b, e) = if rng.gen_bool(0.5) && begin > 0 {
                    let b = rng.gen_range(0..begin);
                    (b, rng.gen_range(b..=begin))
                } else if end < model.len() {
                    let b = rng.gen_range(end..model.len());
                    (b, rng.gen_range(b..=model.len()))
                } else {
                    continue;
                };
                buffer.delete_range(b, e);
                model.drain(b..e);
                if e <= begin {
                    begin -= e - b;
                    end -= e - b;
                }
            }
            _ => {
                buffer.move_gap_to(rng.gen_range(0..=model.len()));
            }
        }

        let interval = buffer.interval(id).unwrap();
        assert_eq!((interval.begin(), interval.end()), (begin, end), "step {step}");
        assert!(!interval.is_dirty(), "step {step}");
        assert_eq!(
            buffer.text_for_interval(id).unwrap().to_vec(),
            b"fox",
            "step {step}"
        );
        assert_eq!(buffer.contents(), model, "step {step}");
    }
}

#[test]
fn whole_buffer_interval_follows_every_edit() {
    // An interval spanning the entire buffer absorbs interior inserts
    // and deletes: it always reads back the whole content.
    let mut rng = StdRng::seed_from_u64(99);
    let mut buffer = GapBuffer::from_str("abcdefgh");
    let mut model: Vec<u8> = b"abcdefgh".to_vec();
    let id = buffer.create_interval(0, model.len());

    for step in 0..300 {
        if model.len() >= 4 && rng.gen_bool(0.4) {
            // Interior single-byte delete, keeping both endpoints.
            let pos = rng.gen_range(1..model.len() - 1);
            buffer.delete_after(pos);
            model.remove(pos);
        } else {
            let pos = rng.gen_range(1..model.len());
            let byte = rng.gen_range(b'a'..=b'z');
            buffer.insert_byte(pos, byte);
            model.insert(pos, byte);
        }

        let interval = buffer.interval(id).unwrap();
        assert_eq!((interval.begin(), interval.end()), (0, model.len()), "step {step}");
        assert!(interval.is_dirty(), "step {step}");
        assert_eq!(buffer.text_for_interval(id).unwrap().to_vec(), model, "step {step}");
    }
}

#[test]
fn gap_churn_never_disturbs_intervals() {
    let mut rng = StdRng::seed_from_u64(5);
    let text = "0123456789abcdefghijklmnopqrstuvwxyz";
    let mut buffer = GapBuffer::from_str(text);

    let mut ids = Vec::new();
    let mut bounds = Vec::new();
    for _ in 0..10 {
        let begin = rng.gen_range(0..text.len());
        let end = rng.gen_range(begin..=text.len());
        ids.push(buffer.create_interval(begin, end));
        bounds.push((begin, end));
    }

    for _ in 0..200 {
        buffer.move_gap_to(rng.gen_range(0..=text.len()));
        for (&id, &(begin, end)) in ids.iter().zip(&bounds) {
            let interval = buffer.interval(id).unwrap();
            assert_eq!((interval.begin(), interval.end()), (begin, end));
            assert!(!interval.is_dirty());
            assert_eq!(
                buffer.text_for_interval(id).unwrap().to_vec(),
                text.as_bytes()[begin..end]
            );
        }
    }
    assert_eq!(buffer.contents(), text.as_bytes());
}
