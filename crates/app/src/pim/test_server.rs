//! A scripted HTTP/1.1 server standing in for the PIM in tests.

use std::{io, net::SocketAddr, sync::Arc, time::Duration};

use tokio::{
    io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader},
    net::{TcpListener, TcpStream},
    sync::Mutex,
    task::JoinHandle,
};

type Routes = dyn Fn(&str, &str) -> FakeResponse + Send + Sync;

#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone)]
pub(crate) struct FakeResponse {
    status: u16,
    body: String,
    delay: Option<Duration>,
}

impl FakeResponse {
    pub(crate) fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

pub(crate) struct FakePim {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl FakePim {
    /// Serve every request with `routes(method, path)`.
    pub(crate) async fn spawn<F>(routes: F) -> io::Result<Self>
    where
        F: Fn(&str, &str) -> FakeResponse + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let routes: Arc<Routes> = Arc::new(routes);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);

        let handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = Arc::clone(&routes);
                let recorded = Arc::clone(&recorded);

                tokio::spawn(async move {
                    let _ = serve(stream, routes.as_ref(), &recorded).await;
                });
            }
        });

        Ok(Self {
            addr,
            requests,
            handle,
        })
    }

    pub(crate) fn ok(body: impl Into<String>) -> FakeResponse {
        Self::status(200, body)
    }

    pub(crate) fn status(status: u16, body: impl Into<String>) -> FakeResponse {
        FakeResponse {
            status,
            body: body.into(),
            delay: None,
        }
    }

    pub(crate) fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub(crate) async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }
}

impl Drop for FakePim {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve(
    mut stream: TcpStream,
    routes: &Routes,
    recorded: &Mutex<Vec<RecordedRequest>>,
) -> io::Result<()> {
    let (reader, mut writer) = stream.split();
    let mut reader = BufReader::new(reader);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;

    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0;
    let mut authorization = None;

    loop {
        let mut line = String::new();
        reader.read_line(&mut line).await?;

        let line = line.trim_end();

        if line.is_empty() {
            break;
        }

        if let Some((name, value)) = line.split_once(':') {
            let value = value.trim();

            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse().unwrap_or(0);
            } else if name.eq_ignore_ascii_case("authorization") {
                authorization = Some(value.to_string());
            }
        }
    }

    let mut body = vec![0; content_length];
    reader.read_exact(&mut body).await?;

    recorded.lock().await.push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        authorization,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let response = routes(&method, &path);

    if let Some(delay) = response.delay {
        tokio::time::sleep(delay).await;
    }

    let head = format!(
        "HTTP/1.1 {} Scripted\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        response.body.len()
    );

    writer.write_all(head.as_bytes()).await?;
    writer.write_all(response.body.as_bytes()).await?;
    writer.shutdown().await
}
