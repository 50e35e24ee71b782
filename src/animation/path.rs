//! Progress-to-polyline interpolation for path animations.

use crate::core::geo::LatLng;

/// Computes the sub-path rendered at a given progress value
///
/// Takes every path vertex up to the current fractional segment and, when
/// the fractional part is non-zero, appends one linearly interpolated point
/// on the partial final segment. At progress 0 the result is the first
/// vertex alone; at progress 1 it is the full path.
pub fn rendered_path(path: &[LatLng], progress: f64) -> Vec<LatLng> {
    if path.is_empty() {
        return Vec::new();
    }
    if path.len() == 1 {
        return path.to_vec();
    }

    let progress = progress.clamp(0.0, 1.0);
    let total_segments = path.len() - 1;
    let position = progress * total_segments as f64;
    let segment_index = (position.floor() as usize).min(total_segments);
    let segment_fraction = position - segment_index as f64;

    let mut rendered = path[..=segment_index].to_vec();
    if segment_fraction > 0.0 && segment_index < total_segments {
        rendered.push(path[segment_index].lerp(&path[segment_index + 1], segment_fraction));
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_point_path() -> Vec<LatLng> {
        vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(1.0, 1.0),
            LatLng::new(2.0, 2.0),
        ]
    }

    #[test]
    fn test_progress_zero_is_first_vertex() {
        assert_eq!(
            rendered_path(&three_point_path(), 0.0),
            vec![LatLng::new(0.0, 0.0)]
        );
    }

    #[test]
    fn test_progress_half_no_interpolated_point() {
        // position = 1.0 exactly: segment fraction is 0, so no extra point
        // is appended.
        assert_eq!(
            rendered_path(&three_point_path(), 0.5),
            vec![LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)]
        );
    }

    #[test]
    fn test_fractional_progress_interpolates() {
        let rendered = rendered_path(&three_point_path(), 0.25);
        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[0], LatLng::new(0.0, 0.0));
        assert_eq!(rendered[1], LatLng::new(0.5, 0.5));
    }

    #[test]
    fn test_progress_one_is_full_path() {
        assert_eq!(rendered_path(&three_point_path(), 1.0), three_point_path());
    }

    #[test]
    fn test_progress_clamped() {
        assert_eq!(rendered_path(&three_point_path(), 2.0), three_point_path());
        assert_eq!(
            rendered_path(&three_point_path(), -1.0),
            vec![LatLng::new(0.0, 0.0)]
        );
    }

    #[test]
    fn test_degenerate_paths() {
        assert!(rendered_path(&[], 0.5).is_empty());
        let single = vec![LatLng::new(1.0, 1.0)];
        assert_eq!(rendered_path(&single, 0.5), single);
    }
}
