use faqbot_core::SparseVector;

/// Cosine of the angle between `a` and `b`; zero when either is the zero vector.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f32 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    a.dot(b) / denom
}

/// Index and score of the best-scoring item. Ties go to the lowest index.
pub fn argmax(scores: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &s) in scores.iter().enumerate() {
        match best {
            Some((_, b)) if s <= b => {}
            _ => best = Some((i, s)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_basics() {
        let a = SparseVector::from_pairs(vec![(0, 1.0), (1, 1.0)]);
        let b = SparseVector::from_pairs(vec![(0, 2.0), (1, 2.0)]);
        let c = SparseVector::from_pairs(vec![(2, 5.0)]);
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);
        assert_eq!(cosine_similarity(&a, &c), 0.0);
        assert_eq!(cosine_similarity(&a, &SparseVector::default()), 0.0);
    }

    #[test]
    fn argmax_prefers_lowest_index_on_ties() {
        assert_eq!(argmax(&[0.2, 0.7, 0.7, 0.1]), Some((1, 0.7)));
        assert_eq!(argmax(&[0.0, 0.0]), Some((0, 0.0)));
        assert_eq!(argmax(&[]), None);
    }
}
