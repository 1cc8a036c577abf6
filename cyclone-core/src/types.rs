//! Core vector type for the particle simulation.
//!
//! All units are SI:
//! - Position: meters (m)
//! - Velocity: meters per second (m/s)
//! - Acceleration: meters per second squared (m/s²)
//! - Force: Newtons (N)
//!
//! ## Mutation discipline
//!
//! Every `Vector3` method taking `&self` is pure and returns a new value. The
//! few methods taking `&mut self` (`clear`, `invert`, `component_product_update`)
//! are the only ones that change the receiver. A pure result
//! that is not assigned anywhere has no effect, so callers updating a field must
//! write it back: `p = p.plus_scaled(v, dt)`.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::error::VectorError;

// =============================================================================
// Vector3 - 3D Vector
// =============================================================================

/// A 3D vector used for positions, velocities, accelerations and forces.
///
/// Coordinate system is right-handed with Y pointing up, so gravity is
/// `(0, -g, 0)`.
///
/// The struct is aligned to four doubles. The trailing eight bytes are padding
/// only: they are not a field and take no part in equality or arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C, align(32))]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);
    pub const X: Vector3 = Vector3::new(1.0, 0.0, 0.0);
    pub const Y: Vector3 = Vector3::new(0.0, 1.0, 0.0);
    pub const Z: Vector3 = Vector3::new(0.0, 0.0, 1.0);
    pub const UP: Vector3 = Vector3::Y;

    /// Standard gravity at the earth's surface.
    pub const GRAVITY: Vector3 = Vector3::new(0.0, -constants::GRAVITY, 0.0);

    /// Twice standard gravity, the usual "game feel" value for ballistics.
    pub const HIGH_GRAVITY: Vector3 = Vector3::new(0.0, -2.0 * constants::GRAVITY, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn zero() -> Self {
        Self::ZERO
    }

    /// Vector of equal magnitude pointing the opposite way
    pub fn negate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }

    /// Flips the vector in place
    pub fn invert(&mut self) {
        *self = self.negate();
    }

    /// Squared magnitude (avoids sqrt for comparisons)
    pub fn squared_magnitude(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Largest absolute component
    fn max_abs_component(&self) -> f64 {
        self.x.abs().max(self.y.abs()).max(self.z.abs())
    }

    /// Magnitude (length) of the vector.
    ///
    /// Components are scaled by the largest one before squaring, so the result
    /// neither overflows nor underflows while the true length is representable.
    pub fn magnitude(&self) -> f64 {
        let largest = self.max_abs_component();
        if largest == 0.0 {
            return 0.0;
        }
        let unit_box = Self::new(self.x / largest, self.y / largest, self.z / largest);
        largest * unit_box.squared_magnitude().sqrt()
    }

    /// Returns a unit vector in the same direction.
    ///
    /// The zero vector has no direction, so normalizing it fails with
    /// [`VectorError::ZeroMagnitude`] instead of quietly returning zero. Any
    /// other finite vector normalizes, however large or small its components.
    pub fn normalized(&self) -> Result<Self, VectorError> {
        let largest = self.max_abs_component();
        if largest == 0.0 {
            return Err(VectorError::ZeroMagnitude);
        }
        // Largest component becomes ±1, so the length below lies in [1, √3]
        let unit_box = Self::new(self.x / largest, self.y / largest, self.z / largest);
        Ok(unit_box.scaled(1.0 / unit_box.squared_magnitude().sqrt()))
    }

    pub fn scaled(&self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k, self.z * k)
    }

    pub fn plus(&self, other: &Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn minus(&self, other: &Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// `self + other * k` in one step
    pub fn plus_scaled(&self, other: &Self, k: f64) -> Self {
        Self::new(
            self.x + other.x * k,
            self.y + other.y * k,
            self.z + other.z * k,
        )
    }

    /// Component-wise (Hadamard) product
    pub fn component_product(&self, other: &Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// Component-wise product, written into `self`
    pub fn component_product_update(&mut self, other: &Self) {
        self.x *= other.x;
        self.y *= other.y;
        self.z *= other.z;
    }

    /// Dot product
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product `self × other` (right-hand rule).
    ///
    /// Operand order matters: `a.cross(&b) == -b.cross(&a)`. With the X axis as
    /// `self` and the Y axis as `other` the result is +Z.
    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Resets every component to zero
    pub fn clear(&mut self) {
        *self = Self::ZERO;
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }
}

/// Builds a right-handed orthonormal basis from two directions (Gram–Schmidt).
///
/// The first returned vector points along `a`. The second lies in the plane of
/// `a` and `b`, on the same side as `b`. The third is `a × b` normalized, so that
/// `first × second == third`.
///
/// ```text
///        b'
///        ↑
///        │
///        └──→ a'
///       ╱
///      c' = a' × b'
/// ```
///
/// Fails with [`VectorError::ZeroMagnitude`] if `a` is zero and with
/// [`VectorError::ParallelVectors`] if `b` is zero or parallel to `a`, since no
/// plane is defined in either case. "Parallel" means the sine of the angle
/// between them is at most `sqrt(EPSILON)`, so rounding noise in `a × b` is not
/// mistaken for a direction.
pub fn orthonormal_basis(
    a: &Vector3,
    b: &Vector3,
) -> Result<(Vector3, Vector3, Vector3), VectorError> {
    let a = a.normalized()?;
    let b = b.normalized().map_err(|_| VectorError::ParallelVectors)?;
    let c = a.cross(&b);
    // |a × b|² = sin²θ for unit inputs
    if c.squared_magnitude() <= constants::EPSILON {
        return Err(VectorError::ParallelVectors);
    }
    let c = c.normalized()?;
    let b = c.cross(&a);
    Ok((a, b, c))
}

// Operator overloads for Vector3
impl Add for Vector3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        self.plus(&other)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl Sub for Vector3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        self.minus(&other)
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
    }
}

impl Mul<f64> for Vector3 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        self.scaled(scalar)
    }
}

impl MulAssign<f64> for Vector3 {
    fn mul_assign(&mut self, scalar: f64) {
        self.x *= scalar;
        self.y *= scalar;
        self.z *= scalar;
    }
}

impl Neg for Vector3 {
    type Output = Self;
    fn neg(self) -> Self {
        self.negate()
    }
}

impl Default for Vector3 {
    fn default() -> Self {
        Self::ZERO
    }
}

// =============================================================================
// Physical Constants
// =============================================================================

/// Physical constants used in the simulation.
pub mod constants {
    /// Gravitational acceleration (m/s²)
    pub const GRAVITY: f64 = 9.81;

    /// Small value for floating-point comparisons
    pub const EPSILON: f64 = 1e-10;
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::constants::EPSILON;
    use super::*;

    fn approx(a: &Vector3, b: &Vector3) -> bool {
        (*a - *b).magnitude() < EPSILON
    }

    #[test]
    fn test_vector3_operations() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);

        assert_eq!(a.plus(&b), Vector3::new(5.0, 7.0, 9.0));
        assert_eq!(a.minus(&b), Vector3::new(-3.0, -3.0, -3.0));
        assert_eq!(a.scaled(2.0), Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(a.dot(&b), 32.0); // 1*4 + 2*5 + 3*6 = 32
        assert_eq!(a.negate(), Vector3::new(-1.0, -2.0, -3.0));
        assert_eq!(a.plus_scaled(&b, 0.5), Vector3::new(3.0, 4.5, 6.0));
        assert_eq!(a.component_product(&b), Vector3::new(4.0, 10.0, 18.0));
    }

    #[test]
    fn test_operators_match_named_methods() {
        let a = Vector3::new(1.5, -2.0, 0.25);
        let b = Vector3::new(-3.0, 4.0, 8.0);

        assert_eq!(a + b, a.plus(&b));
        assert_eq!(a - b, a.minus(&b));
        assert_eq!(a * 3.0, a.scaled(3.0));
        assert_eq!(-a, a.negate());

        let mut c = a;
        c += b;
        c -= b;
        c *= 2.0;
        assert_eq!(c, a.scaled(2.0));
    }

    #[test]
    fn test_vector3_cross_product() {
        let z = Vector3::X.cross(&Vector3::Y);
        assert!(approx(&z, &Vector3::Z));

        // Swapping operands flips the result
        let neg_z = Vector3::Y.cross(&Vector3::X);
        assert!(approx(&neg_z, &-Vector3::Z));
    }

    #[test]
    fn test_algebra_identities() {
        let samples = [
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(-0.5, 7.25, 1e3),
            Vector3::new(1e-3, -4.0, 0.0),
            Vector3::ZERO,
        ];

        for a in &samples {
            for b in &samples {
                assert!(approx(&a.plus(b).minus(b), a), "a + b - b != a for {:?}, {:?}", a, b);
                assert!(approx(&a.cross(b), &b.cross(a).negate()));
                assert_eq!(a.dot(b), b.dot(a));
            }
            assert_eq!(a.scaled(1.0), *a);
            assert!((a.magnitude().powi(2) - a.squared_magnitude()).abs() < 1e-6);
        }
    }

    #[test]
    fn test_vector3_magnitude() {
        let v = Vector3::new(3.0, 4.0, 0.0);
        assert!((v.magnitude() - 5.0).abs() < EPSILON);
        assert_eq!(v.squared_magnitude(), 25.0);
    }

    #[test]
    fn test_vector3_normalized() {
        let v = Vector3::new(3.0, 4.0, 0.0);
        let n = v.normalized().unwrap();
        assert!((n.magnitude() - 1.0).abs() < EPSILON);
        assert!((n.x - 0.6).abs() < EPSILON);
        assert!((n.y - 0.8).abs() < EPSILON);
    }

    #[test]
    fn test_normalize_zero_vector_fails() {
        assert_eq!(Vector3::ZERO.normalized(), Err(VectorError::ZeroMagnitude));
        assert_eq!(
            Vector3::new(0.0, -0.0, 0.0).normalized(),
            Err(VectorError::ZeroMagnitude)
        );
    }

    #[test]
    fn test_normalize_extreme_magnitudes() {
        let samples = [
            Vector3::new(1e-200, 0.0, 0.0),
            Vector3::new(1e200, 0.0, 0.0),
            Vector3::new(3e-200, -4e-200, 0.0),
            Vector3::new(1e300, 1e300, -1e300),
            Vector3::new(5e-324, 0.0, 0.0),
        ];

        for v in &samples {
            let n = v.normalized().unwrap();
            assert!(
                (n.magnitude() - 1.0).abs() < EPSILON,
                "{:?} normalized to {:?}",
                v,
                n
            );
            assert!(n.dot(v) > 0.0, "{:?} flipped direction", v);
        }

        let n = Vector3::new(3e-200, -4e-200, 0.0).normalized().unwrap();
        assert!(approx(&n, &Vector3::new(0.6, -0.8, 0.0)));
    }

    #[test]
    fn test_magnitude_extremes() {
        let big = Vector3::new(3e200, 4e200, 0.0);
        assert!((big.magnitude() / 5e200 - 1.0).abs() < EPSILON);

        let small = Vector3::new(0.0, 3e-200, 4e-200);
        assert!((small.magnitude() / 5e-200 - 1.0).abs() < EPSILON);
        assert_eq!(Vector3::ZERO.magnitude(), 0.0);
    }

    #[test]
    fn test_mutating_updates() {
        let mut v = Vector3::new(2.0, 3.0, 4.0);
        v.component_product_update(&Vector3::new(0.5, 0.0, -1.0));
        assert_eq!(v, Vector3::new(1.0, 0.0, -4.0));

        v.invert();
        assert_eq!(v, Vector3::new(-1.0, -0.0, 4.0));

        v.clear();
        assert!(v.is_zero());
    }

    #[test]
    fn test_pure_operations_leave_receiver_untouched() {
        let v = Vector3::new(1.0, 1.0, 1.0);
        let _ = v.plus_scaled(&Vector3::X, 10.0);
        let _ = v.component_product(&Vector3::ZERO);
        assert_eq!(v, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_orthonormal_basis() {
        let a = Vector3::new(2.0, 0.0, 0.0);
        let b = Vector3::new(1.0, 3.0, 0.0);
        let (x, y, z) = orthonormal_basis(&a, &b).unwrap();

        assert!(approx(&x, &Vector3::X));
        assert!(approx(&y, &Vector3::Y));
        assert!(approx(&z, &Vector3::Z));
        assert!(approx(&x.cross(&y), &z), "basis should be right-handed");
    }

    #[test]
    fn test_orthonormal_basis_general_inputs() {
        let a = Vector3::new(1.0, 2.0, -0.5);
        let b = Vector3::new(-3.0, 0.1, 4.0);
        let (x, y, z) = orthonormal_basis(&a, &b).unwrap();

        for v in [x, y, z] {
            assert!((v.magnitude() - 1.0).abs() < EPSILON);
        }
        assert!(x.dot(&y).abs() < EPSILON);
        assert!(y.dot(&z).abs() < EPSILON);
        assert!(z.dot(&x).abs() < EPSILON);
        // b' stays on the same side of a as b
        assert!(y.dot(&b) > 0.0);
    }

    #[test]
    fn test_orthonormal_basis_rejects_degenerate_inputs() {
        let a = Vector3::new(1.0, 1.0, 0.0);
        assert_eq!(
            orthonormal_basis(&a, &a.scaled(-4.0)),
            Err(VectorError::ParallelVectors)
        );
        assert_eq!(
            orthonormal_basis(&a, &Vector3::ZERO),
            Err(VectorError::ParallelVectors)
        );
        assert_eq!(
            orthonormal_basis(&Vector3::ZERO, &a),
            Err(VectorError::ZeroMagnitude)
        );
    }

    #[test]
    fn test_orthonormal_basis_rejects_scaled_copies() {
        // Most multiples leave rounding noise in a × b rather than an exact zero
        let a = Vector3::new(0.1, 0.7, 0.3);
        for k in [0.01, 0.3, 1.7, 3.3, 7.1, 11.0, -2.9, 1e12, 1e-12] {
            assert_eq!(
                orthonormal_basis(&a, &a.scaled(k)),
                Err(VectorError::ParallelVectors),
                "k={}",
                k
            );
        }

        // Nearly but not quite parallel still builds a basis
        let b = a.plus(&Vector3::new(0.0, 0.0, 0.01));
        assert!(orthonormal_basis(&a, &b).is_ok());
    }

    #[test]
    fn test_alignment_padding() {
        assert_eq!(std::mem::align_of::<Vector3>(), 32);
        assert_eq!(std::mem::size_of::<Vector3>(), 32);
    }
}
