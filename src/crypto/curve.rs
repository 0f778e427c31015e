//! Elliptic curve arithmetic for curves of the form y² = x³ + ax (b = 0)

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::Zero;

/// A curve point in affine coordinates, or the identity element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Point {
    Infinity,
    Affine { x: BigUint, y: BigUint },
}

impl Point {
    pub fn new(x: BigUint, y: BigUint) -> Self {
        Point::Affine { x, y }
    }

    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    /// Affine coordinates, or `None` for the identity.
    pub fn coordinates(&self) -> Option<(&BigUint, &BigUint)> {
        match self {
            Point::Infinity => None,
            Point::Affine { x, y } => Some((x, y)),
        }
    }
}

/// The prime field and the curve coefficient a. Both fixed curves have b = 0,
/// so it never enters the group law.
#[derive(Debug, Clone)]
pub struct Curve {
    pub p: BigUint,
    pub a: BigUint,
}

impl Curve {
    pub fn new(p: BigUint, a: BigUint) -> Self {
        Self { p, a }
    }

    /// Check y² ≡ x³ + ax (mod p). The identity is on every curve.
    pub fn contains(&self, point: &Point) -> bool {
        match point {
            Point::Infinity => true,
            Point::Affine { x, y } => {
                let lhs = (y * y) % &self.p;
                let rhs = (x * x * x + &self.a * x) % &self.p;
                lhs == rhs
            }
        }
    }

    /// (lhs - rhs) mod p for residues already reduced mod p.
    fn sub_mod(&self, lhs: &BigUint, rhs: &BigUint) -> BigUint {
        if lhs >= rhs {
            lhs - rhs
        } else {
            &self.p + lhs - rhs
        }
    }

    /// Modular inverse by Fermat's little theorem; p is prime.
    fn inverse(&self, v: &BigUint) -> BigUint {
        let exponent = &self.p - 2u32;
        v.modpow(&exponent, &self.p)
    }

    /// The inverse point (x, -y).
    pub fn negate(&self, point: &Point) -> Point {
        match point {
            Point::Infinity => Point::Infinity,
            Point::Affine { x, y } => Point::Affine {
                x: x.clone(),
                y: self.sub_mod(&BigUint::zero(), y),
            },
        }
    }

    /// Point doubling with slope λ = (3x² + a) / 2y.
    pub fn double(&self, point: &Point) -> Point {
        let (x, y) = match point.coordinates() {
            Some(c) => c,
            None => return Point::Infinity,
        };
        if y.is_zero() {
            // The tangent is vertical; 2P is the identity.
            return Point::Infinity;
        }

        let numerator = (BigUint::from(3u32) * x * x + &self.a) % &self.p;
        let denominator = (BigUint::from(2u32) * y) % &self.p;
        let slope = (numerator * self.inverse(&denominator)) % &self.p;

        let x3 = self.sub_mod(&((&slope * &slope) % &self.p), &((x + x) % &self.p));
        let y3 = self.sub_mod(&((&slope * self.sub_mod(x, &x3)) % &self.p), y);
        Point::Affine { x: x3, y: y3 }
    }

    /// Group addition. Handles the identity, inverse pairs and doubling.
    pub fn add(&self, lhs: &Point, rhs: &Point) -> Point {
        let (x1, y1) = match lhs.coordinates() {
            Some(c) => c,
            None => return rhs.clone(),
        };
        let (x2, y2) = match rhs.coordinates() {
            Some(c) => c,
            None => return lhs.clone(),
        };

        if x1 == x2 {
            if y1 == y2 {
                return self.double(lhs);
            }
            // Same x, different y: the points are inverses of each other.
            return Point::Infinity;
        }

        // λ = (y2 - y1) / (x2 - x1)
        let numerator = self.sub_mod(y2, y1);
        let denominator = self.sub_mod(x2, x1);
        let slope = (numerator * self.inverse(&denominator)) % &self.p;

        let x3 = self.sub_mod(
            &self.sub_mod(&((&slope * &slope) % &self.p), x1),
            x2,
        );
        let y3 = self.sub_mod(&((&slope * self.sub_mod(x1, &x3)) % &self.p), y1);
        Point::Affine { x: x3, y: y3 }
    }

    /// Scalar multiplication by double-and-add; k = 0 yields the identity.
    pub fn multiply_point(&self, k: &BigUint, point: &Point) -> Point {
        let mut result = Point::Infinity;
        let mut addend = point.clone();
        let mut k = k.clone();

        while !k.is_zero() {
            if k.is_odd() {
                result = self.add(&result, &addend);
            }
            addend = self.double(&addend);
            k >>= 1;
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CurveParameters;
    use num_traits::One;

    #[test]
    fn identity_is_neutral() {
        let params = CurveParameters::server();
        let curve = &params.curve;

        assert_eq!(curve.add(&Point::Infinity, &params.g), params.g);
        assert_eq!(curve.add(&params.g, &Point::Infinity), params.g);
        assert!(curve.add(&Point::Infinity, &Point::Infinity).is_infinity());
    }

    #[test]
    fn adding_inverse_yields_identity() {
        let params = CurveParameters::server();
        let neg = params.curve.negate(&params.g);
        assert!(params.curve.contains(&neg));
        assert!(params.curve.add(&params.g, &neg).is_infinity());
    }

    #[test]
    fn double_matches_add_to_self() {
        let params = CurveParameters::key_pack();
        let doubled = params.curve.double(&params.g);
        assert_eq!(doubled, params.curve.add(&params.g, &params.g));
        assert!(params.curve.contains(&doubled));
    }

    #[test]
    fn scalar_multiples_stay_on_curve() {
        let params = CurveParameters::server();
        for k in [0u32, 1, 2, 3, 17, 1000] {
            let r = params.curve.multiply_point(&BigUint::from(k), &params.g);
            assert!(params.curve.contains(&r));
        }
        assert!(params
            .curve
            .multiply_point(&BigUint::zero(), &params.g)
            .is_infinity());
    }

    #[test]
    fn scalar_multiplication_distributes() {
        // (a + b)G == aG + bG
        let params = CurveParameters::key_pack();
        let a = BigUint::from(123456u32);
        let b = BigUint::from(987654u32);

        let lhs = params.curve.multiply_point(&(&a + &b), &params.g);
        let rhs = params.curve.add(
            &params.curve.multiply_point(&a, &params.g),
            &params.curve.multiply_point(&b, &params.g),
        );
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn one_is_identity_scalar() {
        let params = CurveParameters::server();
        assert_eq!(
            params.curve.multiply_point(&BigUint::one(), &params.g),
            params.g
        );
    }
}
