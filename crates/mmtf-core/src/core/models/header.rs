/// Experimental and bibliographic metadata. Every field is optional in the payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderInfo {
    pub r_free: Option<f32>,
    pub r_work: Option<f32>,
    pub resolution: Option<f32>,
    pub title: Option<String>,
    pub deposition_date: Option<String>,
    pub release_date: Option<String>,
    pub experimental_methods: Vec<String>,
}
