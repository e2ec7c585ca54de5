use super::crop::{Crop, CropStatus};
use super::insight::Insight;
use super::weather::WeatherAlert;
use serde::{Deserialize, Serialize};

/// Crop counts by lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropDistribution {
    pub growing: usize,
    pub harvested: usize,
}

impl CropDistribution {
    pub fn from_crops(crops: &[Crop]) -> Self {
        crops
            .iter()
            .fold(Self::default(), |mut dist, crop| {
                match crop.status {
                    CropStatus::Growing => dist.growing += 1,
                    CropStatus::Harvested => dist.harvested += 1,
                }
                dist
            })
    }

    pub fn total(&self) -> usize {
        self.growing + self.harvested
    }

    /// Nothing to chart; callers should hide the distribution view
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Share of crops still growing, 0.0 when empty
    pub fn growing_ratio(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.growing as f64 / self.total() as f64
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub distribution: CropDistribution,
    pub alert: Option<WeatherAlert>,
    pub insights: Vec<Insight>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn crop(status: CropStatus) -> Crop {
        Crop::new("Cotton", NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), status)
    }

    #[test]
    fn distribution_counts_by_status() {
        let crops = vec![
            crop(CropStatus::Growing),
            crop(CropStatus::Harvested),
            crop(CropStatus::Growing),
        ];
        let dist = CropDistribution::from_crops(&crops);
        assert_eq!(dist.growing, 2);
        assert_eq!(dist.harvested, 1);
        assert_eq!(dist.total(), crops.len());
        assert!(!dist.is_empty());
        assert!((dist.growing_ratio() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_distribution() {
        let dist = CropDistribution::from_crops(&[]);
        assert!(dist.is_empty());
        assert_eq!(dist.growing_ratio(), 0.0);
    }
}
