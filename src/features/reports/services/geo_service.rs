use rand::Rng;

/// Fills in display coordinates for reports submitted without GPS data.
///
/// Reports with real stored coordinates pass through untouched. Reports
/// without them (or with the 0,0 placeholder some clients send) get a
/// point jittered around the city center so map markers do not stack on
/// one pixel. The jitter is display-only and never written back to the
/// database.
pub struct GeoEnrichmentService {
    center: (f64, f64),
    spread: f64,
}

const JAKARTA_CENTER: (f64, f64) = (-6.2088, 106.8456);

impl GeoEnrichmentService {
    pub fn new() -> Self {
        Self {
            center: JAKARTA_CENTER,
            spread: 0.05,
        }
    }

    pub fn display_coords(
        &self,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> (f64, f64) {
        match (latitude, longitude) {
            (Some(lat), Some(lng)) if lat != 0.0 && lng != 0.0 => (lat, lng),
            _ => self.jittered_center(),
        }
    }

    fn jittered_center(&self) -> (f64, f64) {
        let mut rng = rand::thread_rng();
        (
            self.center.0 + rng.gen_range(-self.spread..=self.spread),
            self.center.1 + rng.gen_range(-self.spread..=self.spread),
        )
    }
}

impl Default for GeoEnrichmentService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_coords_pass_through() {
        let service = GeoEnrichmentService::new();
        let (lat, lng) = service.display_coords(Some(-6.1751), Some(106.8650));
        assert_eq!(lat, -6.1751);
        assert_eq!(lng, 106.8650);
    }

    #[test]
    fn missing_coords_land_near_center() {
        let service = GeoEnrichmentService::new();
        for _ in 0..50 {
            let (lat, lng) = service.display_coords(None, None);
            assert!((lat - JAKARTA_CENTER.0).abs() <= 0.05);
            assert!((lng - JAKARTA_CENTER.1).abs() <= 0.05);
        }
    }

    #[test]
    fn zero_placeholder_coords_are_jittered() {
        let service = GeoEnrichmentService::new();
        let (lat, lng) = service.display_coords(Some(0.0), Some(0.0));
        assert!((lat - JAKARTA_CENTER.0).abs() <= 0.05);
        assert!((lng - JAKARTA_CENTER.1).abs() <= 0.05);
    }

    #[test]
    fn partial_coords_are_treated_as_missing() {
        let service = GeoEnrichmentService::new();
        let (lat, _) = service.display_coords(Some(-6.1751), None);
        assert!((lat - JAKARTA_CENTER.0).abs() <= 0.05);
    }
}
