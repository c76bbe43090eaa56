//! Dissimilarity Scoring

use crate::template::TemplatePair;
use crate::VerifyError;
use feature_engine::FeatureVector;

/// Dissimilarity between a test vector and an identity template
///
/// The test vector is quantized with the template's own steps, then
/// compared by Manhattan distance. Lower means more similar; zero means
/// the quantized vector matches the template exactly. Accept/reject is
/// the caller's policy on the returned scalar.
pub fn score(test: &FeatureVector, pair: &TemplatePair) -> Result<f64, VerifyError> {
    if test.len() != pair.dimension() {
        return Err(VerifyError::DimensionMismatch {
            expected: pair.dimension(),
            actual: test.len(),
        });
    }

    let distance = test
        .values
        .iter()
        .zip(&pair.steps)
        .zip(&pair.template)
        .map(|((v, q), t)| (v / q - t).abs())
        .sum();
    Ok(distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateGenerator;
    use proptest::prelude::*;

    #[test]
    fn test_exact_match_scores_zero() {
        let v = FeatureVector::from(vec![1.0, 2.0, 3.0, 4.0]);
        let pair = TemplateGenerator::default()
            .generate(&[v.clone(), v.clone()])
            .unwrap();
        assert_eq!(score(&v, &pair).unwrap(), 0.0);
    }

    #[test]
    fn test_manhattan_distance_over_quantized_values() {
        let pair = TemplatePair {
            template: vec![1.0, 1.0],
            steps: vec![2.0, 4.0],
        };
        let test = FeatureVector::from(vec![4.0, 2.0]);

        // |4/2 - 1| + |2/4 - 1| = 1.0 + 0.5
        assert!((score(&test, &pair).unwrap() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_dimension_mismatch_is_an_error() {
        let pair = TemplatePair {
            template: vec![0.0; 3],
            steps: vec![1.0; 3],
        };
        let test = FeatureVector::from(vec![0.0; 2]);
        assert!(matches!(
            score(&test, &pair),
            Err(VerifyError::DimensionMismatch { expected: 3, actual: 2 })
        ));
    }

    proptest! {
        #[test]
        fn prop_score_is_non_negative_and_zero_on_self(
            values in proptest::collection::vec(-100.0f64..100.0, 1..64),
        ) {
            let v = FeatureVector::from(values);
            let pair = TemplateGenerator::default()
                .generate(&[v.clone()])
                .unwrap();
            let s = score(&v, &pair).unwrap();
            prop_assert!(s >= 0.0);
            prop_assert!(s < 1e-9);
        }
    }
}
