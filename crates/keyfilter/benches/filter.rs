//! Benchmark – reading a GeoJSON-shaped document with and without the key
//! filter in front of the consumer.
#![allow(missing_docs)]

use std::{hint::black_box, time::Duration};

use bstr::BStr;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use keyfilter::{
    FilterKeyHandler, FilterKeyReader, Handler, JsonWriter, ParserOptions, Reader, SliceStream,
    Value, ValueBuilder,
};

/// A deterministic feature collection with `features` polygons of
/// `ring_len` points each.
fn make_feature_collection(features: usize, ring_len: usize) -> String {
    let mut s = String::from(r#"{"type":"FeatureCollection","features":["#);
    for i in 0..features {
        if i > 0 {
            s.push(',');
        }
        s.push_str(r#"{"type":"Feature","geometry":{"type":"Polygon","coordinates":[["#);
        for j in 0..ring_len {
            if j > 0 {
                s.push(',');
            }
            s.push_str(&format!("[{}.{:03},{}.{:03}]", i % 180, j % 1000, j % 90, i % 1000));
        }
        s.push_str(&format!(
            r#"]]}},"properties":{{"id":{i},"name":"feature {i}","area":{}.5}}}}"#,
            i * 3
        ));
    }
    s.push_str("]}");
    s
}

/// Counts events so the work cannot be optimised away.
#[derive(Default)]
struct Counter(usize);

impl Counter {
    fn hit(&mut self) -> bool {
        self.0 += 1;
        true
    }
}

impl Handler for Counter {
    fn null(&mut self) -> bool {
        self.hit()
    }
    fn bool(&mut self, _: bool) -> bool {
        self.hit()
    }
    fn int(&mut self, _: i32) -> bool {
        self.hit()
    }
    fn uint(&mut self, _: u32) -> bool {
        self.hit()
    }
    fn int64(&mut self, _: i64) -> bool {
        self.hit()
    }
    fn uint64(&mut self, _: u64) -> bool {
        self.hit()
    }
    fn double(&mut self, _: f64) -> bool {
        self.hit()
    }
    fn raw_number(&mut self, _: &str) -> bool {
        self.hit()
    }
    fn string(&mut self, _: &str) -> bool {
        self.hit()
    }
    fn start_object(&mut self) -> bool {
        self.hit()
    }
    fn key(&mut self, _: &str) -> bool {
        self.hit()
    }
    fn end_object(&mut self, _: usize) -> bool {
        self.hit()
    }
    fn start_array(&mut self) -> bool {
        self.hit()
    }
    fn end_array(&mut self, _: usize) -> bool {
        self.hit()
    }
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    group.measurement_time(Duration::from_secs(5));

    for (features, ring_len) in [(10, 10), (100, 100), (1_000, 50)] {
        let payload = make_feature_collection(features, ring_len);
        let id = format!("{features}x{ring_len}");
        group.throughput(Throughput::Bytes(payload.len() as u64));

        group.bench_with_input(BenchmarkId::new("unfiltered", &id), &payload, |b, payload| {
            b.iter(|| {
                let mut counter = Counter::default();
                let ok = Reader::new(ParserOptions::default())
                    .parse(&mut SliceStream::new(payload), &mut counter)
                    .is_ok();
                black_box((ok, counter.0))
            });
        });

        group.bench_with_input(BenchmarkId::new("filtered", &id), &payload, |b, payload| {
            b.iter(|| {
                let mut counter = Counter::default();
                let mut filter = FilterKeyHandler::new(&mut counter, BStr::new("coordinates"));
                let ok = Reader::new(ParserOptions::default())
                    .parse(&mut SliceStream::new(payload), &mut filter)
                    .is_ok();
                drop(filter);
                black_box((ok, counter.0))
            });
        });

        group.bench_with_input(BenchmarkId::new("populate", &id), &payload, |b, payload| {
            b.iter(|| {
                let mut reader =
                    FilterKeyReader::new(SliceStream::new(payload), "coordinates", ParserOptions::default());
                black_box(Value::populate(&mut reader))
            });
        });

        group.bench_with_input(BenchmarkId::new("rewrite", &id), &payload, |b, payload| {
            b.iter(|| {
                let mut out = String::with_capacity(payload.len());
                let mut writer = JsonWriter::new(&mut out);
                let mut filter = FilterKeyHandler::new(&mut writer, BStr::new("coordinates"));
                let ok = Reader::new(ParserOptions::default())
                    .parse(&mut SliceStream::new(payload), &mut filter)
                    .is_ok();
                drop(filter);
                drop(writer);
                black_box((ok, out.len()))
            });
        });
    }
    group.finish();

    // Building the tree without any filter, for reference.
    let payload = make_feature_collection(100, 100);
    c.bench_function("builder/100x100", |b| {
        b.iter(|| {
            let mut builder = ValueBuilder::new();
            let ok = Reader::default()
                .parse(&mut SliceStream::new(&payload), &mut builder)
                .is_ok();
            black_box((ok, builder.finish()))
        });
    });
}

criterion_group!(benches, bench_filter);
criterion_main!(benches);
