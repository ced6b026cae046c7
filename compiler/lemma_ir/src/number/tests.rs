use super::*;
use pretty_assertions::assert_eq;

fn ctx() -> NumericContext {
    NumericContext::default()
}

fn lit(text: &str) -> Number {
    Number::from_literal(text).unwrap_or_else(|| panic!("bad literal {text}"))
}

#[test]
fn integer_literals_stay_exact() {
    let n = lit("123456789012345678901234567890");
    assert!(n.is_integer());
    assert_eq!(n.precision(), None);
    assert_eq!(n.to_string(), "123456789012345678901234567890");
}

#[test]
fn real_literals_carry_written_digits() {
    let n = lit("1.50");
    assert_eq!(n.precision(), Some(3));
    assert_eq!(n.to_string(), "1.5");
    assert_eq!(lit("2.5e3").to_string(), "2500.0");
    assert_eq!(lit("0.0001").to_string(), "0.0001");
    assert_eq!(lit("1e-12").to_string(), "1.0e-12");
}

#[test]
fn malformed_literals_are_rejected() {
    for text in ["1.", "1e", "1e+", ".5", "12abc", ""] {
        assert!(Number::from_literal(text).is_none(), "{text}");
    }
}

#[test]
fn rational_arithmetic_is_exact() {
    let third = Number::rational(1, 3).unwrap();
    let sixth = Number::rational(1, 6).unwrap();
    let sum = third.add(&sixth, &ctx()).unwrap();
    assert_eq!(sum, Number::rational(1, 2).unwrap());
    assert_eq!(sum.to_string(), "1/2");

    let whole = sum.add(&Number::rational(1, 2).unwrap(), &ctx()).unwrap();
    assert_eq!(whole, Number::from(1));
}

#[test]
fn division_of_integers_reduces() {
    let q = Number::from(6).div(&Number::from(4), &ctx()).unwrap();
    assert_eq!(q, Number::rational(3, 2).unwrap());
    let q = Number::from(6).div(&Number::from(3), &ctx()).unwrap();
    assert_eq!(q, Number::from(2));
}

#[test]
fn division_by_zero_is_an_error() {
    assert_eq!(
        Number::from(1).div(&Number::from(0), &ctx()),
        Err(NumberError::DivisionByZero)
    );
    assert_eq!(
        Number::from(5).modulo(&Number::from(0)),
        Err(NumberError::DivisionByZero)
    );
}

#[test]
fn real_operand_makes_result_real() {
    let r = Number::from(1).add(&lit("0.5"), &ctx()).unwrap();
    assert_eq!(r.precision(), Some(20));
    assert_eq!(r.to_string(), "1.5");
}

#[test]
fn real_division_honours_precision() {
    let third = Number::from(1).div(&lit("3.0"), &NumericContext::new(5)).unwrap();
    assert_eq!(third.to_string(), "0.33333");

    let third = Number::from(1).div(&lit("3.0"), &NumericContext::new(10)).unwrap();
    assert_eq!(third.to_string(), "0.3333333333");
}

#[test]
fn rounding_is_half_away_from_zero() {
    let two_thirds = lit("2.0").div(&Number::from(3), &NumericContext::new(3)).unwrap();
    assert_eq!(two_thirds.to_string(), "0.667");
    let neg = two_thirds.neg();
    assert_eq!(neg.to_string(), "-0.667");
}

#[test]
fn tiny_addend_is_absorbed() {
    let big = lit("1.0e30");
    let sum = big.add(&lit("1.0e-30"), &NumericContext::new(10)).unwrap();
    assert_eq!(sum, big);
}

#[test]
fn real_equality_ignores_digits() {
    let a = lit("1.5");
    let b = lit("1.5000").to_real(40).unwrap();
    assert_eq!(a, b);
    assert_ne!(a.precision(), b.precision());
}

#[test]
fn integer_and_real_are_distinct_but_compare_equal() {
    let one = Number::from(1);
    let one_real = lit("1.0");
    assert_ne!(one, one_real);
    assert_eq!(one.cmp_value(&one_real), Ok(Ordering::Equal));
    assert_eq!(
        lit("0.5").cmp_value(&Number::rational(1, 3).unwrap()),
        Ok(Ordering::Greater)
    );
}

#[test]
fn exact_powers() {
    let two = Number::from(2);
    assert_eq!(
        two.pow(&Number::from(100), &ctx()).unwrap().to_string(),
        "1267650600228229401496703205376"
    );
    assert_eq!(
        two.pow(&Number::from(-2), &ctx()).unwrap(),
        Number::rational(1, 4).unwrap()
    );
    assert_eq!(
        Number::rational(2, 3).unwrap().pow(&Number::from(2), &ctx()).unwrap(),
        Number::rational(4, 9).unwrap()
    );
    assert_eq!(
        Number::from(0).pow(&Number::from(-1), &ctx()),
        Err(NumberError::DivisionByZero)
    );
}

#[test]
fn non_integer_exponent_is_reported() {
    assert_eq!(
        Number::from(2).pow(&lit("0.5"), &ctx()),
        Err(NumberError::NonIntegerExponent)
    );
}

#[test]
fn real_powers_round_to_precision() {
    let r = lit("1.1").pow(&Number::from(2), &ctx()).unwrap();
    assert_eq!(r.to_string(), "1.21");
    let r = lit("2.0").pow(&Number::from(-1), &ctx()).unwrap();
    assert_eq!(r.to_string(), "0.5");
}

#[test]
fn exact_bits_limit_demotes_to_real() {
    let limited = NumericContext::new(10).with_max_exact_bits(Some(64));
    let big = Number::from(2).pow(&Number::from(100), &limited).unwrap();
    assert_eq!(big.precision(), Some(10));
    assert_eq!(big.to_string(), "1.2676506e30");

    let small = Number::from(2).pow(&Number::from(10), &limited).unwrap();
    assert_eq!(small, Number::from(1024));
}

#[test]
fn integer_division_and_modulo_are_floored() {
    assert_eq!(Number::from(7).modulo(&Number::from(3)), Ok(Number::from(1)));
    assert_eq!(Number::from(-7).modulo(&Number::from(3)), Ok(Number::from(2)));
    assert_eq!(Number::from(-7).div_int(&Number::from(3)), Ok(Number::from(-3)));
    assert_eq!(
        lit("7.0").modulo(&Number::from(3)),
        Err(NumberError::NotAnInteger)
    );
}

#[test]
fn gcd_is_non_negative() {
    assert_eq!(Number::from(-12).gcd(&Number::from(18)), Ok(Number::from(6)));
    assert_eq!(Number::from(0).gcd(&Number::from(5)), Ok(Number::from(5)));
}

#[test]
fn floor_of_each_kind() {
    assert_eq!(Number::rational(-7, 2).unwrap().floor(), Ok(Number::from(-4)));
    assert_eq!(lit("2.75").floor(), Ok(Number::from(2)));
    assert_eq!(Number::from(5).floor(), Ok(Number::from(5)));
}

#[test]
fn square_roots() {
    assert_eq!(Number::from(144).sqrt(&ctx()), Ok(Number::from(12)));
    assert_eq!(
        Number::rational(4, 9).unwrap().sqrt(&ctx()),
        Ok(Number::rational(2, 3).unwrap())
    );
    let root2 = Number::from(2).sqrt(&NumericContext::new(10)).unwrap();
    assert_eq!(root2.to_string(), "1.414213562");
    assert!(matches!(
        Number::from(-1).sqrt(&ctx()),
        Err(NumberError::Domain(_))
    ));
}

#[test]
fn abs_and_neg() {
    assert_eq!(Number::from(-3).abs(), Number::from(3));
    assert_eq!(Number::rational(1, 2).unwrap().neg().to_string(), "-1/2");
    assert!(lit("0.0").neg().is_zero());
}

#[test]
fn extreme_exponents_report_overflow() {
    let huge = lit("1e9223372036854775807");
    assert_eq!(huge.add(&lit("1.0"), &ctx()), Err(NumberError::Overflow));
    assert_eq!(lit("1.0").sub(&huge, &ctx()), Err(NumberError::Overflow));
    assert_eq!(huge.mul(&lit("10.0"), &ctx()), Err(NumberError::Overflow));

    let tiny = lit("1e-9223372036854775808");
    assert_eq!(tiny.add(&lit("1.0"), &ctx()).unwrap().to_string(), "1.0");
    assert_eq!(tiny.floor(), Err(NumberError::Overflow));
    assert!(lit("10e9223372036854775807").precision().is_some());
}

#[test]
fn working_precision_is_clamped() {
    let wide = NumericContext {
        digits: u32::MAX,
        max_exact_bits: None,
    };
    let third = Number::rational(1, 3).unwrap();
    let sum = lit("1.5").add(&Number::from(1), &wide).unwrap();
    assert_eq!(sum.to_string(), "2.5");
    let real = third.to_real(u32::MAX).unwrap();
    assert!(real.precision().is_some_and(|d| d > MAX_PRECISION));
}
