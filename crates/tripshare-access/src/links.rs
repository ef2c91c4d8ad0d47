use thiserror::Error;
use url::Url;

/// Turns codes and tokens into absolute URLs a person can open.
pub trait LinkBuilder: Send + Sync {
    fn invitation_url(&self, code: &str) -> String;
    fn share_url(&self, token: &str) -> String;
}

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("invalid base URL: {0}")]
    Parse(#[from] url::ParseError),
    #[error("base URL cannot carry a path: {0}")]
    NotABase(String),
}

/// Links rooted at the deployment's public URL: `<base>/invite/<code>` and
/// `<base>/share/<token>`.
#[derive(Clone, Debug)]
pub struct BaseUrlLinks {
    base: Url,
}

impl BaseUrlLinks {
    pub fn new(base: &str) -> Result<Self, LinkError> {
        let base = Url::parse(base)?;
        if base.cannot_be_a_base() {
            return Err(LinkError::NotABase(base.to_string()));
        }
        Ok(Self { base })
    }

    fn build(&self, kind: &str, value: &str) -> String {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(kind).push(value);
        }
        url.to_string()
    }
}

impl LinkBuilder for BaseUrlLinks {
    fn invitation_url(&self, code: &str) -> String {
        self.build("invite", code)
    }

    fn share_url(&self, token: &str) -> String {
        self.build("share", token)
    }
}
