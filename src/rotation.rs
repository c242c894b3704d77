//! Rotation/transformation layer: member local↔global rotation and the
//! oblique-support wrap.

use crate::elements::Node;
use crate::math::{block_diagonal_6, member_rotation, rotation_3, Mat3, Mat6};

/// Local-to-global member rotation `R(θ)`: `u_local = R · u_global`.
pub fn member_rotation_matrix(angle: f64) -> Mat6 {
    member_rotation(angle)
}

/// Oblique-support rotation `RI`: identity in non-oblique end blocks, a `-supportAngle`
/// rotation in blocks belonging to a node with exactly one translational restraint and
/// a non-zero support angle.
pub fn oblique_matrix(i_node: &Node, j_node: &Node) -> Mat6 {
    block_diagonal_6(&end_block(i_node), &end_block(j_node))
}

fn end_block(node: &Node) -> Mat3 {
    if node.is_oblique() {
        rotation_3(-node.support_angle)
    } else {
        Mat3::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn oblique_matrix_is_identity_when_no_node_is_oblique() {
        let ni = Node::pinned(0.0, 0.0);
        let nj = Node::roller_y(10.0, 0.0);
        let ri = oblique_matrix(&ni, &nj);
        assert_relative_eq!(ri, Mat6::identity(), epsilon = 1e-12);
    }

    #[test]
    fn oblique_matrix_rotates_only_the_oblique_end() {
        let ni = Node::pinned(0.0, 0.0);
        let nj = Node::roller_y(10.0, 0.0).with_support_angle(std::f64::consts::FRAC_PI_4);
        let ri = oblique_matrix(&ni, &nj);
        assert_relative_eq!(
            ri.fixed_view::<3, 3>(0, 0).into_owned(),
            Mat3::identity(),
            epsilon = 1e-12
        );
        assert!((ri[(3, 3)] - std::f64::consts::FRAC_PI_4.cos()).abs() < 1e-9);
    }
}
