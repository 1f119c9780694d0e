//! Diagnostic views of a `Dict`: text dump and probe-length statistics

use std::io::{self, Write};

use crate::Dict;

/// Printed in place of a missing value
const UNDEF: &str = "UNDEF";

impl Dict {
    /// Writes the dictionary contents to `out`, one line per occupied slot.
    ///
    /// The header carries the capacity and entry count; each following line holds the
    /// physical slot index, the key and the value (`UNDEF` when absent). Meant for
    /// debugging, not for reloading.
    ///
    /// # Errors
    ///
    /// Propagates write errors from `out`.
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "# size={} used={}", self.capacity(), self.len())?;
        for (pos, entry) in self.table().occupied() {
            let value = entry.value.as_deref().unwrap_or(UNDEF);
            writeln!(out, "[{pos:>6}] {key:>20}: {value}", key = entry.key)?;
        }
        Ok(())
    }

    /// Counts live entries per distance from their home slot; index `d` holds the
    /// number of entries sitting `d` slots past home
    #[must_use]
    pub fn displacement_histogram(&self) -> Vec<usize> {
        let mut histogram: Vec<usize> = Vec::new();
        for (_, entry) in self.table().occupied() {
            if histogram.len() <= entry.dib {
                histogram.resize(entry.dib.saturating_add(1), 0);
            }
            if let Some(count) = histogram.get_mut(entry.dib) {
                *count = count.saturating_add(1);
            }
        }
        histogram
    }

    /// Largest distance from home over all live entries
    #[must_use]
    pub fn max_displacement(&self) -> usize {
        self.table().occupied().map(|(_, entry)| entry.dib).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use crate::Dict;

    fn sample() -> Dict {
        let mut dict = Dict::new();
        assert!(dict.insert("k5", None).is_ok());
        for key in ["k6", "k7", "k8"] {
            assert!(dict.insert(key, Some(&format!("v-{key}"))).is_ok());
        }
        dict
    }

    #[test]
    fn test_dump_format() {
        let mut out = Vec::new();
        assert!(sample().dump(&mut out).is_ok());

        let expected = "# size=8 used=4\n\
                        [     0]                   k8: v-k8\n\
                        [     1]                   k7: v-k7\n\
                        [     6]                   k5: UNDEF\n\
                        [     7]                   k6: v-k6\n";
        assert_eq!(String::from_utf8_lossy(&out), expected);
    }

    #[test]
    fn test_dump_empty() {
        let mut out = Vec::new();
        assert!(Dict::with_capacity(16).dump(&mut out).is_ok());
        assert_eq!(String::from_utf8_lossy(&out), "# size=16 used=0\n");
    }

    #[test]
    fn test_displacement_histogram() {
        let dict = sample();
        assert_eq!(dict.displacement_histogram(), vec![1, 1, 2]);
        assert_eq!(dict.max_displacement(), 2);

        let empty = Dict::new();
        assert!(empty.displacement_histogram().is_empty());
        assert_eq!(empty.max_displacement(), 0);
    }

    #[test]
    fn test_histogram_counts_every_entry() {
        let mut dict = Dict::new();
        for i in 0..500 {
            assert!(dict.insert(&format!("key-{i}"), None).is_ok());
        }
        assert_eq!(dict.displacement_histogram().iter().sum::<usize>(), 500);
    }

    #[test]
    fn test_histogram_after_backward_shift() {
        let mut dict = sample();
        assert!(dict.remove("k5"));

        // k6 shifts home, k8 and k7 each move one slot closer
        assert_eq!(dict.displacement_histogram(), vec![1, 2]);
        assert_eq!(dict.max_displacement(), 1);
    }
}
