#![expect(missing_docs)]

#[cfg(feature = "url")]
mod http {
    use std::{
        io::{Read, Write},
        net::TcpListener,
        thread::{self, JoinHandle},
    };

    use splitstream::{ByteSource, ErrorKind, SeparatorSet, Splitter, TextEncoding};
    use url::Url;

    /// Answers exactly one request on a local port with `status` and `body`.
    fn serve_once(status: &str, body: &[u8]) -> (Url, JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let mut response = format!(
            "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        )
        .into_bytes();
        response.extend_from_slice(body);

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            assert!(request.starts_with(b"GET /data.csv "));
            stream.write_all(&response).unwrap();
        });
        let url = Url::parse(&format!("http://{addr}/data.csv")).unwrap();
        (url, handle)
    }

    #[test]
    fn splits_a_response_body() {
        let (url, server) = serve_once("200 OK", "a,b\nżółw".as_bytes());
        let mut splitter = Splitter::fetch(&url, SeparatorSet::try_from(",\n").unwrap()).unwrap();
        splitter.set_buffer_size(3).unwrap();
        assert_eq!(splitter.drain_all().unwrap(), ["a", "b", "żółw"]);
        assert!(splitter.is_finished());
        server.join().unwrap();
    }

    #[test]
    fn decodes_the_body_with_the_given_encoding() {
        let (url, server) = serve_once("200 OK", b"caf\xe9;na\xefve");
        let mut splitter =
            Splitter::fetch_with_encoding(&url, TextEncoding::WINDOWS_1252, SeparatorSet::from(';'))
                .unwrap();
        assert_eq!(splitter.drain_all().unwrap(), ["café", "naïve"]);
        server.join().unwrap();
    }

    #[test]
    fn error_status_is_unavailable() {
        let (url, server) = serve_once("404 Not Found", b"missing");
        let err = ByteSource::fetch(&url).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
        assert!(err.to_string().contains(url.as_str()), "{err}");
        server.join().unwrap();
    }

    #[test]
    fn refused_connection_is_unavailable() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let url = Url::parse(&format!("http://{addr}/gone")).unwrap();
        let err = Splitter::fetch(&url, SeparatorSet::newlines()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
    }
}
