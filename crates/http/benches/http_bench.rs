use bytes::BytesMut;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use http::{HeaderMap, StatusCode};
use indoc::indoc;
use micro_http::codec::body::PayloadDecoder;
use micro_http::codec::{RequestDecoder, ResponseEncoder};
use micro_http::protocol::{BodyFraming, Message};
use tokio_util::codec::{Decoder, Encoder};

static REQUEST: &str = indoc! {r##"
GET /user/123 HTTP/1.1
Host: 127.0.0.1:3000
Sec-Fetch-Dest: document
Sec-Fetch-Mode: navigate
Sec-Fetch-Site: none
Sec-Fetch-User: ?1
sec-ch-ua: "Not A(Brand";v="8", "Chromium";v="132", "Microsoft Edge";v="132"
sec-ch-ua-mobile: ?0
sec-ch-ua-platform: "macOS"
Cache-Control: max-age=0
Connection: keep-alive
Upgrade-Insecure-Requests: 1
User-Agent: Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.0.0 Safari/537.36 Edg/132.0.0.0
Accept-Language: zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7
Accept-Encoding: gzip, deflate, br, zstd
Accept: text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7

"##};

static CHUNKED_BODY: &str = "1a\r\nabcdefghijklmnopqrstuvwxyz\r\n1a\r\nabcdefghijklmnopqrstuvwxyz\r\n0\r\n\r\n";

fn bench_request_decoder(c: &mut Criterion) {
    let wire = REQUEST.replace('\n', "\r\n");
    c.bench_function("decode_header_block", |b| {
        b.iter(|| {
            let mut decoder = RequestDecoder::new();
            let mut bytes = BytesMut::from(wire.as_bytes());
            black_box(decoder.decode(&mut bytes).unwrap());
        });
    });
}

fn bench_chunked_decoder(c: &mut Criterion) {
    c.bench_function("decode_chunked_body", |b| {
        b.iter(|| {
            let mut decoder = PayloadDecoder::chunked();
            let mut bytes = BytesMut::from(CHUNKED_BODY.as_bytes());
            loop {
                match black_box(decoder.decode(&mut bytes).unwrap()) {
                    Some(item) if item.is_eof() => break,
                    Some(_) => continue,
                    None => break,
                }
            }
        });
    });
}

fn bench_response_encoder(c: &mut Criterion) {
    c.bench_function("encode_simple_response", |b| {
        b.iter(|| {
            let mut encoder = ResponseEncoder::new();
            let mut bytes = BytesMut::new();
            let message = Message::Header((StatusCode::OK, HeaderMap::new(), BodyFraming::Length(12)));
            black_box(encoder.encode(message, &mut bytes).unwrap());
        });
    });
}

criterion_group!(benches, bench_request_decoder, bench_chunked_decoder, bench_response_encoder);
criterion_main!(benches);
