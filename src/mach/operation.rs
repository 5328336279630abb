use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Integer arithmetic
///
/// Values are evaluated as 64 bit integers and only wrapped when stored.

pub struct Operation {}

impl Operation {
    pub fn negate(val: i64) -> i64 {
        val.wrapping_neg()
    }

    pub fn multiply(lhs: i64, rhs: i64) -> Result<i64> {
        Ok(lhs.wrapping_mul(rhs))
    }

    /// Truncates toward zero.
    pub fn divide(lhs: i64, rhs: i64) -> Result<i64> {
        if rhs == 0 {
            Err(error!(DivisionByZero))
        } else {
            Ok(lhs.wrapping_div(rhs))
        }
    }

    pub fn remainder(lhs: i64, rhs: i64) -> Result<i64> {
        if rhs == 0 {
            Err(error!(DivisionByZero))
        } else {
            Ok(lhs.wrapping_rem(rhs))
        }
    }

    pub fn sum(lhs: i64, rhs: i64) -> Result<i64> {
        Ok(lhs.wrapping_add(rhs))
    }

    pub fn subtract(lhs: i64, rhs: i64) -> Result<i64> {
        Ok(lhs.wrapping_sub(rhs))
    }

    pub fn equal(lhs: i64, rhs: i64) -> Result<i64> {
        Ok(truth(lhs == rhs))
    }

    pub fn not_equal(lhs: i64, rhs: i64) -> Result<i64> {
        Ok(truth(lhs != rhs))
    }

    pub fn less(lhs: i64, rhs: i64) -> Result<i64> {
        Ok(truth(lhs < rhs))
    }

    pub fn less_equal(lhs: i64, rhs: i64) -> Result<i64> {
        Ok(truth(lhs <= rhs))
    }

    pub fn greater(lhs: i64, rhs: i64) -> Result<i64> {
        Ok(truth(lhs > rhs))
    }

    pub fn greater_equal(lhs: i64, rhs: i64) -> Result<i64> {
        Ok(truth(lhs >= rhs))
    }
}

fn truth(b: bool) -> i64 {
    if b {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divide_truncates_toward_zero() {
        assert_eq!(Operation::divide(7, 2).unwrap(), 3);
        assert_eq!(Operation::divide(-7, 2).unwrap(), -3);
        assert_eq!(Operation::remainder(-7, 2).unwrap(), -1);
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(
            Operation::divide(1, 0).unwrap_err().to_string(),
            "DIVISION BY ZERO"
        );
        assert!(Operation::remainder(1, 0).is_err());
    }

    #[test]
    fn test_comparisons_are_numbers() {
        assert_eq!(Operation::less(1, 2).unwrap(), 1);
        assert_eq!(Operation::greater_equal(1, 2).unwrap(), 0);
        assert_eq!(Operation::divide(i64::min_value(), -1).unwrap(), i64::min_value());
    }
}
