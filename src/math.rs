//! Shared linear-algebra helpers: 2D member stiffness, rotation matrices, and the
//! dense LU solve used by both solvers.

use nalgebra::{DMatrix, DVector, Matrix3, SMatrix, SVector};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;
pub type Mat3 = Matrix3<f64>;
pub type Mat6 = SMatrix<f64, 6, 6>;
pub type Vec6 = SVector<f64, 6>;

/// Build the symmetric 6×6 local member stiffness matrix from its five independent
/// coefficients. Shared by the linear solver (where `a1..a4` are the classical
/// Euler-Bernoulli values) and the non-linear solver (where they are corrected by
/// the stability functions) — the shape is identical, only the coefficients
/// differ.
///
/// `a0 = EA/L`, and `a1..a4` are the transverse/rotational coefficients.
pub fn member_stiffness_from_coeffs(a0: f64, a1: f64, a2: f64, a3: f64, a4: f64) -> Mat6 {
    #[rustfmt::skip]
    let k = Mat6::new(
         a0,  0.0,  0.0, -a0,  0.0,  0.0,
        0.0,   a1,   a2, 0.0,  -a1,   a2,
        0.0,   a2,   a3, 0.0,  -a2,   a4,
        -a0, 0.0,  0.0,  a0,  0.0,  0.0,
        0.0,  -a1,  -a2, 0.0,   a1,  -a2,
        0.0,   a2,   a4, 0.0,  -a2,   a3,
    );
    k
}

/// The classical (linear, Euler-Bernoulli) local member stiffness matrix.
/// Equivalent to `member_stiffness_from_coeffs` evaluated at `C = 4, S = 2`
/// (i.e. zero axial force), so the non-linear solver reduces to this at `P = 0`.
pub fn linear_member_stiffness(ea: f64, ei: f64, length: f64) -> Mat6 {
    let l = length;
    let a0 = ea / l;
    let a1 = 12.0 * ei / l.powi(3);
    let a2 = 6.0 * ei / l.powi(2);
    let a3 = 4.0 * ei / l;
    let a4 = 2.0 * ei / l;
    member_stiffness_from_coeffs(a0, a1, a2, a3, a4)
}

/// The local-to-global member rotation `R(θ)`: block-diagonal in two 3×3 blocks,
/// each `[[c, s, 0], [-s, c, 0], [0, 0, 1]]`. `u_local = R · u_global`.
pub fn member_rotation(theta: f64) -> Mat6 {
    let block = rotation_3(theta);
    block_diagonal_6(&block, &block)
}

/// A 3×3 rotation by `angle`, used for the oblique-support wrap and for rotating a
/// 2-vector of distributed-load components into the member-local frame.
pub fn rotation_3(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    #[rustfmt::skip]
    let m = Mat3::new(
          c,   s, 0.0,
         -s,   c, 0.0,
        0.0, 0.0, 1.0,
    );
    m
}

/// Rotate a 2-vector `(x, y)` by `angle` (standard CCW rotation).
pub fn rotate_2(x: f64, y: f64, angle: f64) -> (f64, f64) {
    let (s, c) = angle.sin_cos();
    (x * c - y * s, x * s + y * c)
}

/// Rotate a global 2-vector `(x, y)` into the member-local frame at angle `theta`
/// (the top-left 2×2 block of `rotation_3`, i.e. `[[c, s], [-s, c]]`).
pub fn global_to_local_2(x: f64, y: f64, theta: f64) -> (f64, f64) {
    let (s, c) = theta.sin_cos();
    (c * x + s * y, -s * x + c * y)
}

/// Compose a 6×6 matrix from two 3×3 diagonal blocks (i-end, j-end), zero elsewhere.
pub fn block_diagonal_6(i_block: &Mat3, j_block: &Mat3) -> Mat6 {
    let mut m = Mat6::zeros();
    for a in 0..3 {
        for b in 0..3 {
            m[(a, b)] = i_block[(a, b)];
            m[(a + 3, b + 3)] = j_block[(a, b)];
        }
    }
    m
}

/// Unpack a `Vec6` into a plain array, for result types that need to be `Serialize`.
pub fn vec6_to_array(v: Vec6) -> [f64; 6] {
    [v[0], v[1], v[2], v[3], v[4], v[5]]
}

/// Solve `K·u = F` by dense LU factorization. Returns `None` if `K` is (numerically)
/// singular — the caller maps this to `FEAError::SingularMatrix`.
pub fn solve_linear_system(k: &Mat, f: &Vec) -> Option<Vec> {
    k.clone().lu().solve(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linear_stiffness_is_symmetric() {
        let k = linear_member_stiffness(1e6, 1e3, 5.0);
        for a in 0..6 {
            for b in 0..6 {
                assert_relative_eq!(k[(a, b)], k[(b, a)], epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn rotation_at_zero_is_identity() {
        let r = member_rotation(0.0);
        assert_relative_eq!(r, Mat6::identity(), epsilon = 1e-12);
    }

    #[test]
    fn rotate_2_preserves_magnitude() {
        let (x, y) = rotate_2(3.0, 4.0, 0.37);
        assert_relative_eq!((x * x + y * y).sqrt(), 5.0, epsilon = 1e-12);
    }
}
