use {
    rocket::{
        Data, Request, Response,
        fairing::{Fairing, Info, Kind},
        http::Header,
    },
    std::time::Instant,
};

/// Allows cross-origin calls from any origin. The request's `Origin` is echoed
/// back because browsers refuse `*` on credentialed requests.
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "CORS headers",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, req: &'r Request<'_>, res: &mut Response<'r>) {
        let origin = req.headers().get_one("Origin").unwrap_or("*").to_owned();
        let allow_headers = req
            .headers()
            .get_one("Access-Control-Request-Headers")
            .unwrap_or("*")
            .to_owned();

        if origin != "*" {
            res.set_header(Header::new("Vary", "Origin"));
        }
        res.set_header(Header::new("Access-Control-Allow-Origin", origin));
        res.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
        res.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "GET, POST, PUT, PATCH, DELETE, OPTIONS",
        ));
        res.set_header(Header::new("Access-Control-Allow-Headers", allow_headers));
    }
}

#[derive(Clone, Copy)]
struct RequestStart(Option<Instant>);

pub struct RequestTrace;

#[rocket::async_trait]
impl Fairing for RequestTrace {
    fn info(&self) -> Info {
        Info {
            name: "Request tracing",
            kind: Kind::Request | Kind::Response,
        }
    }

    async fn on_request(&self, req: &mut Request<'_>, _: &mut Data<'_>) {
        req.local_cache(|| RequestStart(Some(Instant::now())));
    }

    async fn on_response<'r>(&self, req: &'r Request<'_>, res: &mut Response<'r>) {
        let RequestStart(start) = *req.local_cache(|| RequestStart(None));
        let elapsed_ms = start.map(|s| s.elapsed().as_millis() as u64).unwrap_or_default();
        tracing::info!(
            method = %req.method(),
            path = %req.uri().path(),
            status = res.status().code,
            elapsed_ms,
            "handled request"
        );
    }
}
