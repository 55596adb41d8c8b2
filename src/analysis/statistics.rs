use crate::models::RecentValues;

/// Population standard deviation of every value. 0.0 below two values.
pub fn calculate_volatility(values: &RecentValues) -> f64 {
    let data = values.as_slice();
    if data.len() < 2 {
        return 0.0;
    }

    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;

    let variance = data
        .iter()
        .map(|value| {
            let diff = mean - *value;
            diff * diff
        })
        .sum::<f64>()
        / n;

    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volatility_population() {
        // Mean 5, squared deviations sum to 32 over 8 values -> variance 4
        let values = RecentValues::from_newest_first(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((calculate_volatility(&values) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_volatility_small_inputs() {
        assert_eq!(calculate_volatility(&RecentValues::default()), 0.0);
        assert_eq!(calculate_volatility(&RecentValues::from_newest_first(vec![42.0])), 0.0);
        assert_eq!(calculate_volatility(&RecentValues::from_newest_first(vec![3.0, 3.0])), 0.0);
    }
}
