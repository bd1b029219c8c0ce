// Chunked compressor: sizing, framing and engine failure mapping.

use mam::config::HEADER_SIZE;
use mam::container::decode;
use mam::engine::{
    CompressionEngine, CompressionRequest, DecompressionRequest, EngineError, Lznt1Engine,
    NtStatus, WorkspaceSize,
};
use mam::verify::sample;
use mam::{compress, CodecOptions, FormatCode, MamError};

use std::sync::atomic::{AtomicUsize, Ordering};

fn lznt1() -> CodecOptions {
    CodecOptions::new(FormatCode::LZNT1)
}

/// Records what the codec hands to the engine and copies the input through.
#[derive(Default)]
struct Recorder {
    workspace_len: AtomicUsize,
    capacity: AtomicUsize,
    chunk_size: AtomicUsize,
}

impl CompressionEngine for Recorder {
    fn name(&self) -> &'static str {
        "recorder"
    }
    fn supports(&self, _: FormatCode) -> bool {
        true
    }
    fn workspace_size(&self, _: FormatCode) -> Result<WorkspaceSize, EngineError> {
        Ok(WorkspaceSize {
            primary: 777,
            fragment: 0,
        })
    }
    fn compress(&self, req: CompressionRequest<'_>) -> Result<usize, EngineError> {
        self.workspace_len.store(req.workspace.len(), Ordering::SeqCst);
        self.capacity.store(req.destination.len(), Ordering::SeqCst);
        self.chunk_size.store(req.chunk_size as usize, Ordering::SeqCst);
        assert!(req.workspace.as_slice().iter().all(|&b| b == 0));
        req.destination[..req.source.len()].copy_from_slice(req.source);
        Ok(req.source.len())
    }
    fn decompress(&self, req: DecompressionRequest<'_>) -> Result<usize, EngineError> {
        let n = req.source.len().min(req.destination.len());
        req.destination[..n].copy_from_slice(&req.source[..n]);
        Ok(n)
    }
}

struct Refuses;

impl CompressionEngine for Refuses {
    fn name(&self) -> &'static str {
        "refuses"
    }
    fn supports(&self, _: FormatCode) -> bool {
        false
    }
    fn workspace_size(&self, _: FormatCode) -> Result<WorkspaceSize, EngineError> {
        Err(EngineError::Unavailable("no engine on this host".into()))
    }
    fn compress(&self, _: CompressionRequest<'_>) -> Result<usize, EngineError> {
        unreachable!("sizing fails first")
    }
    fn decompress(&self, _: DecompressionRequest<'_>) -> Result<usize, EngineError> {
        unreachable!("sizing fails first")
    }
}

#[test]
fn engine_receives_sized_workspace_and_margin() {
    let engine = Recorder::default();
    let data = b"0123456789";
    let c = compress(&engine, data, &lznt1().overhead_margin(100)).unwrap();
    assert_eq!(engine.workspace_len.load(Ordering::SeqCst), 777);
    assert_eq!(engine.capacity.load(Ordering::SeqCst), 110);
    assert_eq!(engine.chunk_size.load(Ordering::SeqCst), 4096);
    assert_eq!(c.payload(), data);
    assert_eq!(c.uncompressed_size(), 10);
}

#[test]
fn unreachable_engine_is_engine_unavailable() {
    assert!(matches!(
        compress(&Refuses, b"abc", &lznt1()),
        Err(MamError::EngineUnavailable(_))
    ));
}

#[test]
fn repeated_1300_byte_sample_fits_the_bound() {
    let data = sample::repeated_pattern(b"Hello World! ", 1300);
    let c = compress(&Lznt1Engine::new(), &data, &lznt1()).unwrap();
    assert!(c.len() <= 1300 + 4096 + HEADER_SIZE);
    let v = decode(c.as_bytes()).unwrap();
    assert_eq!(v.uncompressed_size, 1300);
    assert_eq!(v.format, FormatCode::LZNT1);
}

#[test]
fn empty_input_records_zero() {
    let c = compress(&Lznt1Engine::new(), &[], &lznt1()).unwrap();
    assert_eq!(c.uncompressed_size(), 0);
    assert_eq!(&c.as_bytes()[..4], b"MAM\x02");
}

#[test]
fn incompressible_input_grows_by_chunk_headers_only() {
    let data = sample::pseudo_random(3 * 4096 + 100, 42);
    let c = compress(&Lznt1Engine::new(), &data, &lznt1()).unwrap();
    // Four stored chunks, two header bytes each.
    assert_eq!(c.payload().len(), data.len() + 4 * 2);
}

#[test]
fn engine_status_is_preserved() {
    let err = compress(&Lznt1Engine::new(), b"abc", &lznt1().chunk_size(65536)).unwrap_err();
    match err {
        MamError::CompressionEngine { status } => {
            assert_eq!(status, NtStatus::INVALID_PARAMETER);
            assert!(err.to_string().contains("0xC000000D"));
        }
        other => panic!("expected CompressionEngine, got {other:?}"),
    }
}
