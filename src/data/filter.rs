use super::model::Record;
use crate::error::SkipReason;

// ---------------------------------------------------------------------------
// Outlier removal: drop the n lowest values
// ---------------------------------------------------------------------------

/// Remove the `n` lowest-valued records and return the rest in time order.
///
/// Ties are broken by position in the file, so the result is deterministic.
/// Needs strictly more than `n` records; anything less would leave nothing to
/// plot.
pub fn drop_lowest(records: &[Record], n: usize) -> Result<Vec<Record>, SkipReason> {
    if records.len() <= n {
        return Err(SkipReason::TooFewRows {
            found: records.len(),
            required: n + 1,
        });
    }

    let mut by_value: Vec<&Record> = records.iter().collect();
    // sort_by is stable, so equal values keep file order
    by_value.sort_by(|a, b| a.value.total_cmp(&b.value));

    let mut kept: Vec<Record> = by_value.into_iter().skip(n).copied().collect();
    kept.sort_by_key(|r| r.timestamp);
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn series(values: &[f64]) -> Vec<Record> {
        let t0 = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| Record {
                timestamp: t0 + Duration::hours(i as i64),
                value,
            })
            .collect()
    }

    #[test]
    fn keeps_len_minus_n_and_only_higher_values() {
        let values = [
            5.0, -3.0, 12.0, 7.5, 0.0, 99.0, 4.0, 4.0, 18.0, -1.0, 3.3, 42.0, 8.0, 1.0, 6.0,
        ];
        let records = series(&values);
        let kept = drop_lowest(&records, 10).unwrap();
        assert_eq!(kept.len(), values.len() - 10);

        let removed: Vec<&Record> = records.iter().filter(|r| !kept.contains(r)).collect();
        assert_eq!(removed.len(), 10);
        let max_removed = removed.iter().map(|r| r.value).fold(f64::MIN, f64::max);
        let min_kept = kept.iter().map(|r| r.value).fold(f64::MAX, f64::min);
        assert!(max_removed <= min_kept);
    }

    #[test]
    fn output_is_in_time_order() {
        let records = series(&[9.0, 1.0, 8.0, 2.0, 7.0, 3.0]);
        let kept = drop_lowest(&records, 3).unwrap();
        let values: Vec<f64> = kept.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![9.0, 8.0, 7.0]);
        assert!(kept.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn ties_at_the_cut_drop_earliest_rows_first() {
        let records = series(&[1.0, 1.0, 1.0, 2.0]);
        let kept = drop_lowest(&records, 2).unwrap();
        assert_eq!(kept, vec![records[2], records[3]]);
    }

    #[test]
    fn exactly_n_rows_is_too_few() {
        let records = series(&[1.0; 10]);
        match drop_lowest(&records, 10) {
            Err(SkipReason::TooFewRows { found, required }) => {
                assert_eq!(found, 10);
                assert_eq!(required, 11);
            }
            other => panic!("expected TooFewRows, got {other:?}"),
        }
        assert_eq!(drop_lowest(&series(&[1.0; 11]), 10).unwrap().len(), 1);
    }
}
