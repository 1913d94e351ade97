/// Validated input for a new DJ profile. Status starts at PENDING and the
/// rating counters at zero.
#[derive(Debug, Clone, Default)]
pub struct NewDjProfile {
    pub user_id: String,
    pub bio: Option<String>,
    pub genres: Vec<String>,
    pub hourly_rate: Option<f64>,
    pub experience: Option<i32>,
    pub phone: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub youtube: Option<String>,
    pub tiktok: Option<String>,
    pub twitter: Option<String>,
    pub website: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius: Option<i32>,
    pub profile_image: Option<String>,
    pub credentials: Vec<String>,
}
