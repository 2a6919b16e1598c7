/// The two platforms a country can be dominated by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Ios,
    Android,
}

impl Platform {
    /// Classify a country by its iOS share. iOS wins only on a strict
    /// majority; a missing share can never win.
    pub fn dominant(ios_share: Option<f64>) -> Platform {
        match ios_share {
            Some(share) if share > 50.0 => Platform::Ios,
            _ => Platform::Android,
        }
    }

    /// Value fed to the choropleth colorscale (1 = iOS, 0 = Android).
    pub fn color_value(self) -> f64 {
        match self {
            Platform::Ios => 1.0,
            Platform::Android => 0.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Platform::Ios => "iOS",
            Platform::Android => "Android",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CountryShare {
    pub country: String,
    pub ios_share: Option<f64>,
    pub android_share: Option<f64>,
    pub dominant: Platform,
}
