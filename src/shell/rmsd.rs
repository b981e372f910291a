//! Optimal-superposition RMSD between equal-size structures.

use nalgebra::{Matrix3, Vector3};

use super::error::Error;

/// Root-mean-square deviation after centroid removal and the optimal
/// (Kabsch) rotation of `a` onto `b`.
///
/// Shells compared here come from different trajectory frames, so absolute
/// box placement carries no information; only the internal geometry should
/// count toward diversity.
pub fn superposed_rmsd(a: &[[f64; 3]], b: &[[f64; 3]]) -> Result<f64, Error> {
    if a.len() != b.len() {
        return Err(Error::structure_mismatch(a.len(), b.len()));
    }
    if a.is_empty() {
        return Ok(0.0);
    }

    let pa: Vec<Vector3<f64>> = centered(a);
    let pb: Vec<Vector3<f64>> = centered(b);

    // Cross-covariance of the two centered point sets.
    let mut h = Matrix3::zeros();
    for (p, q) in pa.iter().zip(&pb) {
        h += p * q.transpose();
    }

    let svd = h.svd(true, true);
    let u = svd.u.expect("SVD of a 3x3 matrix always yields U");
    let v_t = svd.v_t.expect("SVD of a 3x3 matrix always yields V^T");

    // Guard against an improper rotation (reflection).
    let mut correction = Matrix3::identity();
    if (u * v_t).determinant() < 0.0 {
        correction[(2, 2)] = -1.0;
    }
    let rotation = v_t.transpose() * correction * u.transpose();

    let n = a.len() as f64;
    let sum_sq: f64 = pa
        .iter()
        .zip(&pb)
        .map(|(p, q)| (rotation * p - q).norm_squared())
        .sum();

    Ok((sum_sq / n).sqrt())
}

fn centered(points: &[[f64; 3]]) -> Vec<Vector3<f64>> {
    let n = points.len() as f64;
    let mut centroid = Vector3::zeros();
    for p in points {
        centroid += Vector3::new(p[0], p[1], p[2]) / n;
    }
    points
        .iter()
        .map(|p| Vector3::new(p[0], p[1], p[2]) - centroid)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tetrahedron() -> Vec<[f64; 3]> {
        vec![
            [1.0, 1.0, 1.0],
            [1.0, -1.0, -1.0],
            [-1.0, 1.0, -1.0],
            [-1.0, -1.0, 1.0],
        ]
    }

    #[test]
    fn identical_structures_have_zero_rmsd() {
        let points = tetrahedron();
        let rmsd = superposed_rmsd(&points, &points).unwrap();
        assert_relative_eq!(rmsd, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn translation_is_invisible() {
        let points = tetrahedron();
        let shifted: Vec<[f64; 3]> = points
            .iter()
            .map(|p| [p[0] + 5.0, p[1] - 3.0, p[2] + 0.5])
            .collect();
        let rmsd = superposed_rmsd(&points, &shifted).unwrap();
        assert_relative_eq!(rmsd, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn rotation_is_invisible() {
        let points = tetrahedron();
        // 90° about z: (x, y, z) -> (-y, x, z).
        let rotated: Vec<[f64; 3]> = points.iter().map(|p| [-p[1], p[0], p[2]]).collect();
        let rmsd = superposed_rmsd(&points, &rotated).unwrap();
        assert_relative_eq!(rmsd, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn distortion_is_measured() {
        let points = tetrahedron();
        let mut stretched = points.clone();
        stretched[0] = [2.0, 2.0, 2.0];
        let rmsd = superposed_rmsd(&points, &stretched).unwrap();
        assert!(rmsd > 0.1, "stretch should register, got {}", rmsd);
    }

    #[test]
    fn size_mismatch_is_an_error() {
        let points = tetrahedron();
        let err = superposed_rmsd(&points, &points[..3]).unwrap_err();
        assert!(matches!(
            err,
            Error::StructureMismatch {
                expected: 4,
                actual: 3
            }
        ));
    }
}
