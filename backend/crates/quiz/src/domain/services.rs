//! Domain Services
//!
//! Pure question-pool generation. No randomness and no I/O: the same
//! selection always yields the same pool.

use std::collections::BTreeSet;

use crate::domain::entities::{Question, QuestionPool};
use crate::domain::value_objects::{Operation, Pairing};
use crate::error::{QuizError, QuizResult};

/// Largest operand (and times-table factor) accepted; keeps every answer
/// well inside `u32`.
pub const MAX_OPERAND: u32 = 1_000;

/// Reject selections that cannot produce a pool.
pub fn validate_selection(
    operations: &BTreeSet<Operation>,
    numbers: &BTreeSet<u32>,
    pairing: Pairing,
) -> QuizResult<()> {
    if operations.is_empty() {
        return Err(QuizError::invalid_config(
            "at least one operation must be selected",
        ));
    }
    if numbers.is_empty() {
        return Err(QuizError::invalid_config(
            "at least one number must be selected",
        ));
    }
    if numbers.contains(&0) {
        return Err(QuizError::invalid_config("numbers must be positive"));
    }
    if let Some(&largest) = numbers.last() {
        if largest > MAX_OPERAND {
            return Err(QuizError::invalid_config(format!(
                "numbers must not exceed {MAX_OPERAND}"
            )));
        }
    }
    if let Pairing::TimesTable { max_factor } = pairing {
        if max_factor == 0 || max_factor > MAX_OPERAND {
            return Err(QuizError::invalid_config(format!(
                "times table factor must be between 1 and {MAX_OPERAND}"
            )));
        }
    }
    Ok(())
}

/// Every valid fact for the selected operations and numbers.
///
/// # Errors
///
/// Returns `QuizError::InvalidConfiguration` when either selection is empty,
/// a number is zero, or a bound is exceeded.
pub fn generate_question_pool(
    operations: &BTreeSet<Operation>,
    numbers: &BTreeSet<u32>,
    pairing: Pairing,
) -> QuizResult<QuestionPool> {
    validate_selection(operations, numbers, pairing)?;

    let pairs = pairing.pairs(numbers.iter().copied());
    let pool = QuestionPool::from_questions(pairs.into_iter().flat_map(|(a, b)| {
        operations
            .iter()
            .filter_map(move |&operation| Question::new(operation, a, b))
    }));

    tracing::debug!(
        operations = operations.len(),
        numbers = numbers.len(),
        pool_size = pool.len(),
        "Generated question pool"
    );

    Ok(pool)
}

/// Size of the pool the same selection would produce; 0 when invalid.
pub fn max_valid_questions(
    operations: &BTreeSet<Operation>,
    numbers: &BTreeSet<u32>,
    pairing: Pairing,
) -> usize {
    generate_question_pool(operations, numbers, pairing)
        .map(|pool| pool.len())
        .unwrap_or(0)
}

/// Preset round sizes that fit into a pool of `max_valid` questions.
pub fn card_count_options(max_valid: usize, presets: &[usize]) -> Vec<usize> {
    presets
        .iter()
        .copied()
        .filter(|&n| n > 0 && n <= max_valid)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ops(list: &[Operation]) -> BTreeSet<Operation> {
        list.iter().copied().collect()
    }

    fn nums(list: impl IntoIterator<Item = u32>) -> BTreeSet<u32> {
        list.into_iter().collect()
    }

    #[test]
    fn multiplication_of_one_two_three() {
        let pool = generate_question_pool(
            &ops(&[Operation::Multiplication]),
            &nums([1, 2, 3]),
            Pairing::Selection,
        )
        .unwrap();

        let pairs: Vec<(u32, u32)> = pool.iter().map(|q| (q.left(), q.right())).collect();
        assert_eq!(pairs, vec![(1, 1), (1, 2), (1, 3), (2, 2), (2, 3), (3, 3)]);
        assert!(pool.iter().all(|q| q.operation() == Operation::Multiplication));
    }

    #[test]
    fn multiplication_size_is_unordered_pairs_with_self_pairs() {
        for n in 1..=12u32 {
            let pool = generate_question_pool(
                &ops(&[Operation::Multiplication]),
                &nums(1..=n),
                Pairing::Selection,
            )
            .unwrap();
            let n = n as usize;
            assert_eq!(pool.len(), n * (n + 1) / 2);
        }
    }

    #[test]
    fn subtraction_never_goes_negative() {
        let pool = generate_question_pool(
            &ops(&[Operation::Subtraction]),
            &nums([2, 5, 9, 11]),
            Pairing::TimesTable { max_factor: 12 },
        )
        .unwrap();
        assert!(!pool.is_empty());
        assert!(pool.iter().all(|q| q.left() >= q.right()));
    }

    #[test]
    fn division_is_always_exact() {
        let pool = generate_question_pool(
            &ops(&[Operation::Division]),
            &nums(1..=12),
            Pairing::TimesTable { max_factor: 12 },
        )
        .unwrap();
        assert!(!pool.is_empty());
        for q in pool.iter() {
            assert_eq!(q.left() % q.right(), 0, "{q} is not exact");
            assert_eq!(q.answer() * q.right(), q.left());
        }
    }

    #[test]
    fn division_skips_coprime_pairs() {
        let pool = generate_question_pool(
            &ops(&[Operation::Division]),
            &nums([5, 7]),
            Pairing::Selection,
        )
        .unwrap();
        let prompts: Vec<String> = pool.iter().map(|q| q.prompt()).collect();
        assert_eq!(prompts, vec!["5 ÷ 5", "7 ÷ 7"]);
    }

    #[test]
    fn generation_is_deterministic() {
        let operations = ops(&Operation::ALL);
        let numbers = nums([3, 4, 6, 8]);
        let a = generate_question_pool(&operations, &numbers, Pairing::Selection).unwrap();
        let b = generate_question_pool(&operations, &numbers, Pairing::Selection).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn times_table_matches_classic_drill_size() {
        let pool = generate_question_pool(
            &ops(&[Operation::Multiplication]),
            &nums(1..=5),
            Pairing::TimesTable { max_factor: 12 },
        )
        .unwrap();
        assert_eq!(pool.len(), 60);
    }

    #[test]
    fn duplicate_facts_collapse() {
        // 3 - 2 arises from (2, 3) and (3, 2)
        let pool = generate_question_pool(
            &ops(&[Operation::Subtraction]),
            &nums([2, 3]),
            Pairing::TimesTable { max_factor: 3 },
        )
        .unwrap();
        let prompts: Vec<String> = pool.iter().map(|q| q.prompt()).collect();
        assert_eq!(prompts, vec!["2 - 1", "2 - 2", "3 - 1", "3 - 2", "3 - 3"]);
        assert_eq!(Pairing::TimesTable { max_factor: 3 }.pairs([2, 3]).len(), 6);
    }

    #[test]
    fn empty_selections_are_invalid() {
        let err = generate_question_pool(
            &ops(&[Operation::Addition]),
            &BTreeSet::new(),
            Pairing::Selection,
        )
        .unwrap_err();
        assert!(matches!(err, QuizError::InvalidConfiguration(_)));

        for op in Operation::ALL {
            assert!(generate_question_pool(&ops(&[op]), &BTreeSet::new(), Pairing::Selection).is_err());
        }

        let err =
            generate_question_pool(&BTreeSet::new(), &nums([1, 2]), Pairing::Selection).unwrap_err();
        assert!(matches!(err, QuizError::InvalidConfiguration(_)));
    }

    #[test]
    fn zero_and_oversized_numbers_are_invalid() {
        let add = ops(&[Operation::Addition]);
        assert!(generate_question_pool(&add, &nums([0, 1]), Pairing::Selection).is_err());
        assert!(
            generate_question_pool(&add, &nums([MAX_OPERAND + 1]), Pairing::Selection).is_err()
        );
        assert!(
            generate_question_pool(&add, &nums([2]), Pairing::TimesTable { max_factor: 0 })
                .is_err()
        );
    }

    #[test]
    fn max_valid_questions_matches_pool() {
        let operations = ops(&[Operation::Addition, Operation::Division]);
        let numbers = nums([2, 3, 4]);
        let pairing = Pairing::TimesTable { max_factor: 12 };
        let pool = generate_question_pool(&operations, &numbers, pairing).unwrap();
        assert_eq!(max_valid_questions(&operations, &numbers, pairing), pool.len());
        assert_eq!(max_valid_questions(&operations, &BTreeSet::new(), pairing), 0);
    }

    #[test]
    fn card_options_fit_the_pool() {
        let presets = [5, 10, 15, 20, 25];
        assert_eq!(card_count_options(12, &presets), vec![5, 10]);
        assert_eq!(card_count_options(60, &presets), presets.to_vec());
        assert!(card_count_options(3, &presets).is_empty());
    }
}
