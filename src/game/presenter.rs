use super::image::{image_candidates, resolve_image, ImageLoader};
use super::session::{Choice, Phase, Session, SessionError};
use crate::catalog::ChampionRecord;
use rand::Rng;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub enum Presentation {
    Card {
        record: Rc<ChampionRecord>,
        image_url: String,
    },
    Finished,
}

/// Resolves an image for the current champion.
///
/// Champions whose candidates all fail are skipped with [`Choice::ErrorSkip`]
/// until one loads or the list runs out.
pub fn present_current<R: Rng + ?Sized>(
    session: &mut Session<'_>,
    loader: &dyn ImageLoader,
    base_url: &str,
    rng: &mut R,
) -> Result<Presentation, SessionError> {
    loop {
        match session.phase() {
            Phase::Setup => return Err(SessionError::NotPresenting),
            Phase::Finished => return Ok(Presentation::Finished),
            Phase::Presenting(_) => {}
        }

        let record = match session.current() {
            Some(record) => Rc::clone(record),
            None => return Err(SessionError::NotPresenting),
        };

        let candidates = image_candidates(base_url, &record, rng);
        match resolve_image(loader, &candidates) {
            Some(image_url) => return Ok(Presentation::Card { record, image_url }),
            None => {
                session.decide(Choice::ErrorSkip)?;
            }
        }
    }
}
