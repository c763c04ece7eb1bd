mod page;

pub mod lobby;

use content::{Catalogue, Page};
use core::time::Duration;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::{
    body::{Body, Bytes},
    header::{HeaderValue, CONTENT_TYPE},
    Method, Request, Response, StatusCode,
};
use lobby::{Lobby, SessionId};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::error::Error;

pub type BoxError = Box<dyn Error + Send + Sync>;

/// Request bodies are tiny JSON objects.
const MAX_BODY_SIZE: usize = 1024;

#[derive(Deserialize)]
struct Choice {
    choice: usize,
}

#[derive(Deserialize)]
struct Answer {
    question: Box<str>,
    choice: usize,
}

#[derive(Serialize)]
struct Mounted<'a> {
    session: SessionId,
    title: &'a str,
    total: usize,
}

async fn read_json<T, B>(body: B) -> Result<T, StatusCode>
where
    T: DeserializeOwned,
    B: Body,
    B::Error: Into<BoxError>,
{
    let bytes = match Limited::new(body, MAX_BODY_SIZE).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) if err.is::<LengthLimitError>() => return Err(StatusCode::PAYLOAD_TOO_LARGE),
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };
    serde_json::from_slice(&bytes).map_err(|_| StatusCode::BAD_REQUEST)
}

fn json<T: Serialize>(status: StatusCode, value: &T) -> Result<Response<Full<Bytes>>, StatusCode> {
    let bytes = serde_json::to_vec(value).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let mut res = Response::new(Full::new(Bytes::from(bytes)));
    *res.status_mut() = status;
    assert!(res.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("application/json")).is_none());
    Ok(res)
}

fn empty(status: StatusCode) -> Response<Full<Bytes>> {
    let mut res = Response::new(Full::default());
    *res.status_mut() = status;
    res
}

fn parse_session(id: &str) -> Result<SessionId, StatusCode> {
    id.parse().map_err(|_| StatusCode::BAD_REQUEST)
}

pub struct App {
    catalogue: Catalogue,
    lobby: Lobby,
}

impl App {
    pub fn new(catalogue: Catalogue, ttl: Duration) -> Self {
        Self { catalogue, lobby: Lobby::new(ttl) }
    }

    fn page(&self, slug: &str) -> Result<&Page, StatusCode> {
        self.catalogue.get(slug).ok_or(StatusCode::NOT_FOUND)
    }

    pub async fn respond<B>(&self, req: Request<B>) -> Response<Full<Bytes>>
    where
        B: Body,
        B::Error: Into<BoxError>,
    {
        let method = req.method().clone();
        let path = Box::<str>::from(req.uri().path());
        match self.try_respond(req).await {
            Ok(res) => {
                log::debug!("{method} {path} -> {}", res.status());
                res
            }
            Err(status) => {
                log::warn!("{method} {path} -> {status}");
                empty(status)
            }
        }
    }

    pub async fn try_respond<B>(&self, req: Request<B>) -> Result<Response<Full<Bytes>>, StatusCode>
    where
        B: Body,
        B::Error: Into<BoxError>,
    {
        let (parts, body) = req.into_parts();
        let segments: Vec<_> = parts.uri.path().split('/').filter(|segment| !segment.is_empty()).collect();

        match (parts.method, segments.as_slice()) {
            (Method::GET, ["pages"]) => json(StatusCode::OK, &page::list(&self.catalogue)),
            (Method::GET, ["pages", slug]) => {
                let page = self.page(slug)?;
                json(StatusCode::OK, &page::PageView::from(page))
            }
            (Method::POST, ["pages", slug, "checks", id]) => {
                let page = self.page(slug)?;
                let Choice { choice } = read_json(body).await?;
                let reveal = page::check(page, id, choice).ok_or(StatusCode::NOT_FOUND)?.map_err(|err| {
                    log::warn!("inline check `{id}` on `{slug}` rejected: {err}");
                    StatusCode::BAD_REQUEST
                })?;
                json(StatusCode::OK, &reveal)
            }
            (Method::POST, ["pages", slug, "quiz"]) => {
                let page = self.page(slug)?;
                let quiz = page.quiz().ok_or(StatusCode::NOT_FOUND)?;
                let session = self.lobby.mount(page.slug(), quiz.clone());
                json(StatusCode::CREATED, &Mounted { session, title: quiz.title(), total: quiz.len() })
            }
            (Method::GET, ["sessions", id]) => {
                let progress = self.lobby.progress(parse_session(id)?).map_err(|err| err.status())?;
                json(StatusCode::OK, &progress)
            }
            (Method::POST, ["sessions", id]) => {
                let id = parse_session(id)?;
                let Answer { question, choice } = read_json(body).await?;
                let answered = self.lobby.answer(id, &question, choice).map_err(|err| {
                    log::warn!("session {id} rejected an answer: {err}");
                    err.status()
                })?;
                json(StatusCode::OK, &answered)
            }
            (Method::DELETE, ["sessions", id]) => {
                self.lobby.unmount(parse_session(id)?).map_err(|err| err.status())?;
                Ok(empty(StatusCode::NO_CONTENT))
            }
            (_, ["pages"] | ["pages", _] | ["pages", _, "checks", _] | ["pages", _, "quiz"] | ["sessions", _]) => {
                Err(StatusCode::METHOD_NOT_ALLOWED)
            }
            _ => Err(StatusCode::NOT_FOUND),
        }
    }
}
