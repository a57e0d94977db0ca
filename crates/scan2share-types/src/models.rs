use serde::{Deserialize, Deserializer, Serialize};

/// Fixed daily reward rate applied to every new staking position.
pub const DAILY_REWARD_RATE: f64 = 0.02;

// -- Events --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub location: String,
    pub hashtags: Vec<String>,
    pub short_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_payload: Option<String>,
    pub start_ms: i64,
    /// `0` means the event has no end and is never swept into the past list.
    pub end_ms: i64,
}

/// Event fields supplied by the caller; id and short code are generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "de_list")]
    pub hashtags: Vec<String>,
    pub start_ms: i64,
    pub end_ms: i64,
}

// -- Shares --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Linkedin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareRecord {
    pub id: String,
    /// Weak reference: the event may have been deleted since.
    pub event_id: String,
    pub platform: Platform,
    pub url: String,
    pub timestamp: i64,
    pub verified: bool,
    pub reward: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewShare {
    pub event_id: String,
    pub platform: Platform,
    pub url: String,
}

// -- Staking --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakingPosition {
    pub id: String,
    pub amount: f64,
    pub start_ms: i64,
    pub reward_per_day: f64,
}

impl StakingPosition {
    /// Reward earned between `start_ms` and `now_ms`, prorated over fractional days.
    pub fn reward_at(&self, now_ms: i64) -> f64 {
        const MS_PER_DAY: f64 = 1000.0 * 60.0 * 60.0 * 24.0;
        let days = (now_ms - self.start_ms) as f64 / MS_PER_DAY;
        self.amount * self.reward_per_day * days
    }
}

// -- Catalog --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub industry: String,
    pub description: String,
    pub location: String,
    pub employees: String,
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub founded: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCompany {
    pub name: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub employees: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub founded: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Internship,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: JobType,
    pub salary: String,
    pub posted: String,
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: JobType,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub posted: String,
    #[serde(default, deserialize_with = "de_list")]
    pub skills: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de_opt_list")]
    pub requirements: Option<Vec<String>>,
    #[serde(default, deserialize_with = "de_opt_list")]
    pub benefits: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GigLevel {
    Beginner,
    Intermediate,
    Expert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GigPricing {
    #[serde(rename = "Fixed Price")]
    FixedPrice,
    Hourly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gig {
    pub id: String,
    pub title: String,
    pub client: String,
    pub budget: String,
    pub duration: String,
    pub level: GigLevel,
    pub category: String,
    pub description: String,
    pub skills: Vec<String>,
    pub posted: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<GigPricing>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGig {
    pub title: String,
    pub client: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub duration: String,
    pub level: GigLevel,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "de_list")]
    pub skills: Vec<String>,
    #[serde(default)]
    pub posted: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub pricing: Option<GigPricing>,
}

// -- Users --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    /// Argon2 PHC string. `None` for accounts created through OAuth,
    /// which can never sign in with a password.
    #[serde(default)]
    pub password_hash: Option<String>,
    pub full_name: String,
    pub title: String,
    pub about: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    pub created_at: i64,
}

/// Registration input: user fields minus id and creation time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SignUp {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "de_opt_list")]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Partial profile update. Absent fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "de_opt_list")]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl User {
    /// Merge a partial update into this record. Email is handled by the store,
    /// which has to re-key the user map.
    pub fn merge(&mut self, update: ProfileUpdate) {
        if let Some(v) = update.full_name {
            self.full_name = v;
        }
        if let Some(v) = update.title {
            self.title = v;
        }
        if let Some(v) = update.about {
            self.about = v;
        }
        if update.location.is_some() {
            self.location = update.location;
        }
        if update.website.is_some() {
            self.website = update.website;
        }
        if update.skills.is_some() {
            self.skills = update.skills;
        }
        if update.experience.is_some() {
            self.experience = update.experience;
        }
        if update.avatar.is_some() {
            self.avatar = update.avatar;
        }
    }
}

/// Split a comma-separated form field into trimmed, non-empty entries.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// List fields arrive either as JSON arrays or as the raw comma-separated
/// text of a form input.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListInput {
    Items(Vec<String>),
    Text(String),
}

impl ListInput {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::Items(items) => items
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Self::Text(raw) => parse_list(&raw),
        }
    }
}

fn de_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(ListInput::deserialize(deserializer)?.into_vec())
}

/// An empty list collapses to `None`, as the profile form does.
fn de_opt_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    let items = Option::<ListInput>::deserialize(deserializer)?
        .map(ListInput::into_vec)
        .unwrap_or_default();
    Ok(if items.is_empty() { None } else { Some(items) })
}
