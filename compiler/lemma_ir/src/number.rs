//! Arbitrary-precision numeric tower.
//!
//! Exact values are `Integer` and `Rational`; everything else is a decimal
//! `Real` carrying its own significant-digit count. Arithmetic takes a
//! [`NumericContext`] that supplies the working precision for real results
//! and the optional bit limit above which exact results are demoted to reals.
//!
//! Real arithmetic is done on the decimal mantissa directly, so huge
//! exponents never materialise as huge integers. Conversions that do need the
//! exact value (`floor`, comparison) are bounded by [`MAX_DECIMAL_SHIFT`].

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;

/// Largest power of ten materialised when converting a real to an exact value.
pub const MAX_DECIMAL_SHIFT: i64 = 100_000;

/// Exact powers whose estimated result exceeds this many bits are refused.
const MAX_EXACT_POWER_BITS: u64 = 1 << 24;

/// Largest working precision, in significant decimal digits.
///
/// Settings and `N` calls asking for more are rejected by the evaluator;
/// arithmetic clamps to it.
pub const MAX_PRECISION: u32 = 10_000;

/// Extra digits carried through intermediate real computations.
const GUARD_DIGITS: u32 = 3;

/// Digits carried while computing a result of `digits` significant digits.
fn working_digits(digits: u32) -> u32 {
    digits.min(MAX_PRECISION) + GUARD_DIGITS
}

/// Working precision and exactness limit for arithmetic.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NumericContext {
    /// Significant decimal digits of real results.
    pub digits: u32,
    /// Exact results wider than this (numerator or denominator) become reals.
    pub max_exact_bits: Option<u64>,
}

impl NumericContext {
    /// Context with `digits` of working precision, clamped to [`MAX_PRECISION`].
    pub const fn new(digits: u32) -> Self {
        let digits = if digits > MAX_PRECISION {
            MAX_PRECISION
        } else {
            digits
        };
        NumericContext {
            digits,
            max_exact_bits: None,
        }
    }

    #[must_use]
    pub const fn with_max_exact_bits(mut self, bits: Option<u64>) -> Self {
        self.max_exact_bits = bits;
        self
    }
}

impl Default for NumericContext {
    fn default() -> Self {
        NumericContext::new(20)
    }
}

/// Failure of a numeric operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NumberError {
    DivisionByZero,
    /// Operation needs integer operands.
    NotAnInteger,
    /// Power with a non-integer exponent; callers leave it symbolic.
    NonIntegerExponent,
    /// Argument outside the operation's domain (e.g. square root of a negative).
    Domain(&'static str),
    /// Result too large to represent.
    Overflow,
}

impl fmt::Display for NumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberError::DivisionByZero => write!(f, "division by zero"),
            NumberError::NotAnInteger => write!(f, "operation requires integer arguments"),
            NumberError::NonIntegerExponent => write!(f, "exponent is not an integer"),
            NumberError::Domain(what) => write!(f, "argument out of domain: {what}"),
            NumberError::Overflow => write!(f, "numeric result too large"),
        }
    }
}

impl std::error::Error for NumberError {}

/// Decimal floating value `mantissa * 10^exponent`.
///
/// The mantissa never has trailing zeros (zero is `0 * 10^0`), so two reals
/// with the same value have the same fields apart from `digits`.
#[derive(Clone, Debug)]
pub struct Real {
    mantissa: BigInt,
    exponent: i64,
    digits: u32,
}

impl Real {
    /// Build a real, stripping trailing zeros from the mantissa.
    pub fn new(mantissa: BigInt, exponent: i64, digits: u32) -> Self {
        let mut real = Real {
            mantissa,
            exponent,
            digits: digits.max(1),
        };
        real.normalize();
        real
    }

    fn zero(digits: u32) -> Self {
        Real::new(BigInt::zero(), 0, digits)
    }

    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }

    fn normalize(&mut self) {
        if self.mantissa.is_zero() {
            self.exponent = 0;
            return;
        }
        let ten = BigInt::from(10u32);
        while (&self.mantissa % &ten).is_zero() {
            let Some(exponent) = self.exponent.checked_add(1) else {
                break;
            };
            self.mantissa /= &ten;
            self.exponent = exponent;
        }
    }

    /// Round half away from zero to `digits` significant digits.
    fn rounded(mantissa: BigInt, exponent: i64, digits: u32) -> Result<Self, NumberError> {
        let len = decimal_len(&mantissa);
        let digits = digits.clamp(1, MAX_PRECISION + GUARD_DIGITS);
        if len <= u64::from(digits) {
            return Ok(Real::new(mantissa, exponent, digits));
        }
        let drop = len - u64::from(digits);
        let scale = pow10(drop)?;
        let negative = mantissa.is_negative();
        let magnitude = mantissa.abs();
        let mut quotient = &magnitude / &scale;
        let remainder = &magnitude % &scale;
        if remainder * 2u32 >= scale {
            quotient += 1u32;
        }
        if negative {
            quotient = -quotient;
        }
        let exponent = checked_shift(exponent, drop)?;
        Ok(Real::new(quotient, exponent, digits))
    }

    /// Position of the decimal point relative to the first mantissa digit.
    fn order(&self) -> Result<i64, NumberError> {
        checked_shift(self.exponent, decimal_len(&self.mantissa))
    }

    fn to_rational(&self) -> Result<BigRational, NumberError> {
        if self.exponent.unsigned_abs() > MAX_DECIMAL_SHIFT.unsigned_abs() {
            return Err(NumberError::Overflow);
        }
        let scale = pow10(self.exponent.unsigned_abs())?;
        if self.exponent >= 0 {
            Ok(BigRational::from_integer(&self.mantissa * scale))
        } else {
            Ok(BigRational::new(self.mantissa.clone(), scale))
        }
    }

    fn from_rational(value: &BigRational, digits: u32) -> Result<Self, NumberError> {
        Real::divide(value.numer(), 0, value.denom(), 0, digits)
    }

    /// `(a * 10^ea) / (b * 10^eb)` to `digits` significant digits.
    fn divide(
        a: &BigInt,
        ea: i64,
        b: &BigInt,
        eb: i64,
        digits: u32,
    ) -> Result<Self, NumberError> {
        if b.is_zero() {
            return Err(NumberError::DivisionByZero);
        }
        if a.is_zero() {
            return Ok(Real::zero(digits));
        }
        let wanted = i64::from(working_digits(digits));
        let shift = (wanted + to_i64(decimal_len(b)) - to_i64(decimal_len(a))).max(0);
        let scaled = a * pow10(shift.unsigned_abs())?;
        let quotient = scaled / b;
        let exponent = ea
            .checked_sub(eb)
            .and_then(|e| e.checked_sub(shift))
            .ok_or(NumberError::Overflow)?;
        Real::rounded(quotient, exponent, digits)
    }

    fn add(&self, other: &Real, digits: u32) -> Result<Self, NumberError> {
        if self.mantissa.is_zero() {
            return Real::rounded(other.mantissa.clone(), other.exponent, digits);
        }
        if other.mantissa.is_zero() {
            return Real::rounded(self.mantissa.clone(), self.exponent, digits);
        }
        // An addend entirely below the working precision cannot affect the result.
        let reach = i128::from(working_digits(digits));
        let gap = i128::from(self.order()?) - i128::from(other.order()?);
        if gap > reach {
            return Real::rounded(self.mantissa.clone(), self.exponent, digits);
        }
        if -gap > reach {
            return Real::rounded(other.mantissa.clone(), other.exponent, digits);
        }
        let exponent = self.exponent.min(other.exponent);
        let a = &self.mantissa * pow10(exponent_gap(self.exponent, exponent)?)?;
        let b = &other.mantissa * pow10(exponent_gap(other.exponent, exponent)?)?;
        Real::rounded(a + b, exponent, digits)
    }

    fn mul(&self, other: &Real, digits: u32) -> Result<Self, NumberError> {
        let exponent = self
            .exponent
            .checked_add(other.exponent)
            .ok_or(NumberError::Overflow)?;
        Real::rounded(&self.mantissa * &other.mantissa, exponent, digits)
    }

    fn neg(&self) -> Self {
        Real {
            mantissa: -&self.mantissa,
            exponent: self.exponent,
            digits: self.digits,
        }
    }

    fn powi(&self, exponent: &BigInt, digits: u32) -> Result<Self, NumberError> {
        let mut remaining = exponent.abs().to_u64().ok_or(NumberError::Overflow)?;
        let working = working_digits(digits);
        let mut base = self.clone();
        let mut acc = Real::new(BigInt::one(), 0, working);
        while remaining > 0 {
            if remaining & 1 == 1 {
                acc = acc.mul(&base, working)?;
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.mul(&base, working)?;
            }
        }
        if exponent.is_negative() {
            Real::divide(&BigInt::one(), 0, &acc.mantissa, acc.exponent, digits)
        } else {
            Real::rounded(acc.mantissa, acc.exponent, digits)
        }
    }

    fn sqrt(&self, digits: u32) -> Result<Self, NumberError> {
        if self.mantissa.is_negative() {
            return Err(NumberError::Domain("square root of a negative number"));
        }
        if self.mantissa.is_zero() {
            return Ok(Real::zero(digits));
        }
        let mut mantissa = self.mantissa.clone();
        let mut exponent = self.exponent;
        if exponent % 2 != 0 {
            mantissa *= 10u32;
            exponent = exponent.checked_sub(1).ok_or(NumberError::Overflow)?;
        }
        let wanted = 2 * u64::from(working_digits(digits));
        let len = decimal_len(&mantissa);
        if len < wanted {
            let mut extra = wanted - len;
            extra += extra % 2;
            mantissa *= pow10(extra)?;
            exponent = exponent
                .checked_sub(to_i64(extra))
                .ok_or(NumberError::Overflow)?;
        }
        Real::rounded(mantissa.sqrt(), exponent / 2, digits)
    }
}

impl PartialEq for Real {
    /// Value equality; the digit count is a property of the computation, not
    /// of the value.
    fn eq(&self, other: &Self) -> bool {
        self.mantissa == other.mantissa && self.exponent == other.exponent
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mantissa.is_negative() {
            f.write_str("-")?;
        }
        let text = self.mantissa.magnitude().to_str_radix(10);
        let len = to_i64(text.len() as u64);
        let point = self.exponent.saturating_add(len);

        if self.exponent >= 0 && point <= 21 {
            let zeros = "0".repeat(self.exponent.unsigned_abs() as usize);
            write!(f, "{text}{zeros}.0")
        } else if self.exponent < 0 && point > 0 {
            let (whole, frac) = text.split_at(point.unsigned_abs() as usize);
            write!(f, "{whole}.{frac}")
        } else if self.exponent < 0 && point > -6 {
            let zeros = "0".repeat(point.unsigned_abs() as usize);
            write!(f, "0.{zeros}{text}")
        } else {
            let (first, rest) = text.split_at(1);
            let rest = if rest.is_empty() { "0" } else { rest };
            write!(f, "{first}.{rest}e{}", point.saturating_sub(1))
        }
    }
}

/// A number value.
#[derive(Clone, Debug)]
pub enum Number {
    Integer(BigInt),
    /// Always reduced, denominator greater than one.
    Rational(BigRational),
    Real(Real),
}

impl Number {
    /// Parse a lexed numeric literal.
    ///
    /// Integers become `Integer`; literals with a fraction or exponent become
    /// `Real` carrying the number of significant digits written. Returns
    /// `None` when the text is not a well-formed literal.
    pub fn from_literal(text: &str) -> Option<Number> {
        let (body, exp_text) = match text.find(|c| c == 'e' || c == 'E') {
            Some(pos) => (&text[..pos], Some(&text[pos + 1..])),
            None => (text, None),
        };
        let (whole, frac) = match body.find('.') {
            Some(pos) => (&body[..pos], Some(&body[pos + 1..])),
            None => (body, None),
        };
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if let Some(frac) = frac {
            if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
        }
        let exponent = match exp_text {
            Some(e) => {
                let digits = e.strip_prefix(|c| c == '+' || c == '-').unwrap_or(e);
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                e.strip_prefix('+').unwrap_or(e).parse::<i64>().ok()?
            }
            None => 0,
        };

        if frac.is_none() && exp_text.is_none() {
            return whole.parse::<BigInt>().ok().map(Number::Integer);
        }

        let frac = frac.unwrap_or("");
        let all_digits = format!("{whole}{frac}");
        let significant = all_digits.trim_start_matches('0').len().max(1);
        let mantissa = all_digits.parse::<BigInt>().ok()?;
        let exponent = exponent.checked_sub(to_i64(frac.len() as u64))?;
        let digits = u32::try_from(significant).unwrap_or(u32::MAX);
        Some(Number::Real(Real::new(mantissa, exponent, digits)))
    }

    pub fn integer(value: impl Into<BigInt>) -> Number {
        Number::Integer(value.into())
    }

    /// Exact quotient `numer / denom`, reduced.
    pub fn rational(
        numer: impl Into<BigInt>,
        denom: impl Into<BigInt>,
    ) -> Result<Number, NumberError> {
        let denom = denom.into();
        if denom.is_zero() {
            return Err(NumberError::DivisionByZero);
        }
        Ok(Number::from_ratio(BigRational::new(numer.into(), denom)))
    }

    fn from_ratio(value: BigRational) -> Number {
        if value.denom().is_one() {
            Number::Integer(value.to_integer())
        } else {
            Number::Rational(value)
        }
    }

    /// `None` for exact numbers, the significant digit count for reals.
    pub fn precision(&self) -> Option<u32> {
        match self {
            Number::Real(real) => Some(real.digits),
            Number::Integer(_) | Number::Rational(_) => None,
        }
    }

    pub fn is_exact(&self) -> bool {
        !matches!(self, Number::Real(_))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Number::Integer(value) => Some(value),
            _ => None,
        }
    }

    pub fn to_i64(&self) -> Option<i64> {
        self.as_integer().and_then(ToPrimitive::to_i64)
    }

    pub fn to_usize(&self) -> Option<usize> {
        self.as_integer().and_then(ToPrimitive::to_usize)
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Number::Integer(value) => value.is_zero(),
            Number::Rational(value) => value.is_zero(),
            Number::Real(real) => real.mantissa.is_zero(),
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Number::Integer(value) => value.is_negative(),
            Number::Rational(value) => value.is_negative(),
            Number::Real(real) => real.mantissa.is_negative(),
        }
    }

    /// Exact value of `self`; reals are expanded when the exponent allows.
    pub fn to_rational(&self) -> Result<BigRational, NumberError> {
        match self {
            Number::Integer(value) => Ok(BigRational::from_integer(value.clone())),
            Number::Rational(value) => Ok(value.clone()),
            Number::Real(real) => real.to_rational(),
        }
    }

    /// Convert to a real with `digits` significant digits.
    pub fn to_real(&self, digits: u32) -> Result<Number, NumberError> {
        let real = match self {
            Number::Integer(value) => Real::rounded(value.clone(), 0, digits)?,
            Number::Rational(value) => Real::from_rational(value, digits)?,
            Number::Real(real) => Real::rounded(real.mantissa.clone(), real.exponent, digits)?,
        };
        Ok(Number::Real(real))
    }

    fn as_real(&self, digits: u32) -> Result<Real, NumberError> {
        match self.to_real(working_digits(digits))? {
            Number::Real(real) => Ok(real),
            Number::Integer(_) | Number::Rational(_) => Err(NumberError::Overflow),
        }
    }

    /// Apply the exactness limit: exact values wider than `max_exact_bits`
    /// become reals at the working precision.
    pub fn finish(self, ctx: &NumericContext) -> Result<Number, NumberError> {
        let Some(limit) = ctx.max_exact_bits else {
            return Ok(self);
        };
        let too_wide = match &self {
            Number::Integer(value) => value.bits() > limit,
            Number::Rational(value) => value.numer().bits() > limit || value.denom().bits() > limit,
            Number::Real(_) => false,
        };
        if too_wide {
            self.to_real(ctx.digits)
        } else {
            Ok(self)
        }
    }

    pub fn add(&self, other: &Number, ctx: &NumericContext) -> Result<Number, NumberError> {
        let result = match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => Number::Integer(a + b),
            (a, b) if a.is_exact() && b.is_exact() => {
                Number::from_ratio(a.to_rational()? + b.to_rational()?)
            }
            (a, b) => Number::Real(a.as_real(ctx.digits)?.add(&b.as_real(ctx.digits)?, ctx.digits)?),
        };
        result.finish(ctx)
    }

    pub fn sub(&self, other: &Number, ctx: &NumericContext) -> Result<Number, NumberError> {
        self.add(&other.neg(), ctx)
    }

    pub fn mul(&self, other: &Number, ctx: &NumericContext) -> Result<Number, NumberError> {
        let result = match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => Number::Integer(a * b),
            (a, b) if a.is_exact() && b.is_exact() => {
                Number::from_ratio(a.to_rational()? * b.to_rational()?)
            }
            (a, b) => Number::Real(a.as_real(ctx.digits)?.mul(&b.as_real(ctx.digits)?, ctx.digits)?),
        };
        result.finish(ctx)
    }

    pub fn div(&self, other: &Number, ctx: &NumericContext) -> Result<Number, NumberError> {
        if other.is_zero() {
            return Err(NumberError::DivisionByZero);
        }
        let result = if self.is_exact() && other.is_exact() {
            Number::from_ratio(self.to_rational()? / other.to_rational()?)
        } else {
            let a = self.as_real(ctx.digits)?;
            let b = other.as_real(ctx.digits)?;
            Number::Real(Real::divide(&a.mantissa, a.exponent, &b.mantissa, b.exponent, ctx.digits)?)
        };
        result.finish(ctx)
    }

    /// Raise to an integer power. Exact bases stay exact unless the result
    /// would exceed the exactness limit.
    pub fn pow(&self, exponent: &Number, ctx: &NumericContext) -> Result<Number, NumberError> {
        let Number::Integer(n) = exponent else {
            return Err(NumberError::NonIntegerExponent);
        };
        if n.is_negative() && self.is_zero() {
            return Err(NumberError::DivisionByZero);
        }
        if let Number::Real(real) = self {
            return Ok(Number::Real(real.powi(n, ctx.digits)?));
        }

        let value = self.to_rational()?;
        let magnitude = n.abs().to_u64().ok_or(NumberError::Overflow)?;
        let width = value.numer().bits().max(value.denom().bits());
        let estimate = width.saturating_mul(magnitude);
        let over_limit = ctx.max_exact_bits.is_some_and(|limit| estimate > limit);
        if over_limit || estimate > MAX_EXACT_POWER_BITS {
            if over_limit {
                let real = self.as_real(ctx.digits)?;
                return Ok(Number::Real(real.powi(n, ctx.digits)?));
            }
            return Err(NumberError::Overflow);
        }

        let exp = u32::try_from(magnitude).map_err(|_| NumberError::Overflow)?;
        let numer = value.numer().pow(exp);
        let denom = value.denom().pow(exp);
        let raised = if n.is_negative() {
            BigRational::new(denom, numer)
        } else {
            BigRational::new(numer, denom)
        };
        Number::from_ratio(raised).finish(ctx)
    }

    #[must_use]
    pub fn neg(&self) -> Number {
        match self {
            Number::Integer(value) => Number::Integer(-value),
            Number::Rational(value) => Number::Rational(-value),
            Number::Real(real) => Number::Real(real.neg()),
        }
    }

    #[must_use]
    pub fn abs(&self) -> Number {
        if self.is_negative() {
            self.neg()
        } else {
            self.clone()
        }
    }

    /// Largest integer not greater than `self`.
    pub fn floor(&self) -> Result<Number, NumberError> {
        match self {
            Number::Integer(_) => Ok(self.clone()),
            Number::Rational(value) => Ok(Number::Integer(value.floor().to_integer())),
            Number::Real(real) => Ok(Number::Integer(real.to_rational()?.floor().to_integer())),
        }
    }

    /// Remainder of floored division; takes the sign of the divisor.
    pub fn modulo(&self, other: &Number) -> Result<Number, NumberError> {
        let (a, b) = integer_pair(self, other)?;
        Ok(Number::Integer(floor_mod(a, b)))
    }

    /// Quotient of floored division.
    pub fn div_int(&self, other: &Number) -> Result<Number, NumberError> {
        let (a, b) = integer_pair(self, other)?;
        let remainder = floor_mod(a, b);
        Ok(Number::Integer((a - remainder) / b))
    }

    /// Greatest common divisor of two integers, always non-negative.
    pub fn gcd(&self, other: &Number) -> Result<Number, NumberError> {
        let (Some(a), Some(b)) = (self.as_integer(), other.as_integer()) else {
            return Err(NumberError::NotAnInteger);
        };
        let mut a = a.abs();
        let mut b = b.abs();
        while !b.is_zero() {
            let r = &a % &b;
            a = b;
            b = r;
        }
        Ok(Number::Integer(a))
    }

    /// Square root; exact for perfect squares, otherwise a real.
    pub fn sqrt(&self, ctx: &NumericContext) -> Result<Number, NumberError> {
        if self.is_negative() {
            return Err(NumberError::Domain("square root of a negative number"));
        }
        match self {
            Number::Integer(value) => {
                let root = value.sqrt();
                if &root * &root == *value {
                    return Ok(Number::Integer(root));
                }
            }
            Number::Rational(value) => {
                let numer = value.numer().sqrt();
                let denom = value.denom().sqrt();
                if &numer * &numer == *value.numer() && &denom * &denom == *value.denom() {
                    return Ok(Number::from_ratio(BigRational::new(numer, denom)));
                }
            }
            Number::Real(_) => {}
        }
        Ok(Number::Real(self.as_real(ctx.digits)?.sqrt(ctx.digits)?))
    }

    /// Numeric comparison across kinds.
    pub fn cmp_value(&self, other: &Number) -> Result<Ordering, NumberError> {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => Ok(a.cmp(b)),
            (a, b) => Ok(a.to_rational()?.cmp(&b.to_rational()?)),
        }
    }
}

impl PartialEq for Number {
    /// Same kind and same value. `1` and `1.0` are different numbers here;
    /// use [`Number::cmp_value`] for numeric equality.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            (Number::Rational(a), Number::Rational(b)) => a == b,
            (Number::Real(a), Number::Real(b)) => a == b,
            _ => false,
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(BigInt::from(value))
    }
}

impl From<BigInt> for Number {
    fn from(value: BigInt) -> Self {
        Number::Integer(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(value) => write!(f, "{value}"),
            Number::Rational(value) => write!(f, "{}/{}", value.numer(), value.denom()),
            Number::Real(real) => write!(f, "{real}"),
        }
    }
}

fn integer_pair<'a>(a: &'a Number, b: &'a Number) -> Result<(&'a BigInt, &'a BigInt), NumberError> {
    let (Some(a), Some(b)) = (a.as_integer(), b.as_integer()) else {
        return Err(NumberError::NotAnInteger);
    };
    if b.is_zero() {
        return Err(NumberError::DivisionByZero);
    }
    Ok((a, b))
}

fn floor_mod(a: &BigInt, b: &BigInt) -> BigInt {
    let mut remainder = a % b;
    if !remainder.is_zero() && remainder.is_negative() != b.is_negative() {
        remainder += b;
    }
    remainder
}

fn decimal_len(value: &BigInt) -> u64 {
    if value.is_zero() {
        1
    } else {
        value.magnitude().to_str_radix(10).len() as u64
    }
}

fn pow10(exponent: u64) -> Result<BigInt, NumberError> {
    let exponent = u32::try_from(exponent).map_err(|_| NumberError::Overflow)?;
    if i64::from(exponent) > MAX_DECIMAL_SHIFT {
        return Err(NumberError::Overflow);
    }
    Ok(BigInt::from(10u32).pow(exponent))
}

fn checked_shift(exponent: i64, by: u64) -> Result<i64, NumberError> {
    i64::try_from(by)
        .ok()
        .and_then(|by| exponent.checked_add(by))
        .ok_or(NumberError::Overflow)
}

/// Distance between two exponents with `from >= to`.
fn exponent_gap(from: i64, to: i64) -> Result<u64, NumberError> {
    from.checked_sub(to)
        .map(i64::unsigned_abs)
        .ok_or(NumberError::Overflow)
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests;
