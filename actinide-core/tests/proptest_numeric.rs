// actinide-core - Property tests for numeric semantics
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Promotion, self-equality, and negation properties of the two numeric
//! kinds.

mod common;

use common::*;

use actinide_parser::BigInt;
use proptest::prelude::*;

/// Format a decimal literal the reader is guaranteed to classify as one.
fn decimal_literal(mantissa: i32, shift: u8) -> String {
    format!("{}e-{}", mantissa, shift)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Integer arithmetic matches the bigint library, with no range limit.
    #[test]
    fn integer_addition_matches_bigint(a in any::<i64>(), b in any::<i64>()) {
        let result = eval_str(&format!("(+ {} {})", a, b)).unwrap();
        prop_assert_eq!(result, vec![Value::integer(BigInt::from(a) + BigInt::from(b))]);
    }

    #[test]
    fn integer_multiplication_matches_bigint(a in any::<i64>(), b in any::<i64>()) {
        let result = eval_str(&format!("(* {} {})", a, b)).unwrap();
        prop_assert_eq!(result, vec![Value::integer(BigInt::from(a) * BigInt::from(b))]);
    }

    /// Floored division pairs with the remainder identity
    /// a = (a / b) * b + r where 0 <= r < |b| has the divisor's sign.
    #[test]
    fn integer_division_floors(a in any::<i32>(), b in any::<i32>()) {
        prop_assume!(b != 0);
        let result = eval_one(&format!("(/ {} {})", a, b)).unwrap();
        let expected = BigInt::from(num_integer::Integer::div_floor(
            &i64::from(a),
            &i64::from(b),
        ));
        prop_assert_eq!(result, Value::integer(expected));
    }

    /// Any operation with a decimal operand yields a decimal.
    #[test]
    fn decimal_operands_promote(a in any::<i32>(), m in any::<i32>(), shift in 0u8..6) {
        let lit = decimal_literal(m, shift);
        for op in ["+", "-", "*"] {
            let result = eval_one(&format!("(decimal? ({} {} {}))", op, a, lit)).unwrap();
            prop_assert_eq!(result, Value::bool(true));
        }
    }

    /// Integer-only operations stay integers.
    #[test]
    fn integer_operands_stay_integers(a in any::<i32>(), b in any::<i32>()) {
        for op in ["+", "-", "*"] {
            let result = eval_one(&format!("(integer? ({} {} {}))", op, a, b)).unwrap();
            prop_assert_eq!(result, Value::bool(true));
        }
    }

    /// (= x x) for every number.
    #[test]
    fn numbers_equal_themselves(m in any::<i32>(), shift in 0u8..6) {
        let lit = decimal_literal(m, shift);
        prop_assert_eq!(eval_one(&format!("(= {} {})", m, m)).unwrap(), Value::bool(true));
        prop_assert_eq!(
            eval_one(&format!("(= {lit} {lit})", lit = lit)).unwrap(),
            Value::bool(true)
        );
        prop_assert_eq!(
            eval_one(&format!("(eq? {lit} {lit})", lit = lit)).unwrap(),
            Value::bool(true)
        );
    }

    /// (= x (- 0 x)) exactly when x is zero.
    #[test]
    fn negation_fixpoint_is_zero(x in any::<i32>()) {
        let result = eval_one(&format!("(= {x} (- 0 {x}))", x = x)).unwrap();
        prop_assert_eq!(result, Value::bool(x == 0));
    }

    /// Ordering is total and consistent with equality on integers.
    #[test]
    fn ordering_is_consistent(a in any::<i32>(), b in any::<i32>()) {
        let lt = eval_one(&format!("(< {} {})", a, b)).unwrap() == Value::bool(true);
        let gt = eval_one(&format!("(> {} {})", a, b)).unwrap() == Value::bool(true);
        let eq = eval_one(&format!("(= {} {})", a, b)).unwrap() == Value::bool(true);
        prop_assert_eq!(1, usize::from(lt) + usize::from(gt) + usize::from(eq));
    }
}
