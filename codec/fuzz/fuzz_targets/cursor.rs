#![no_main]

use arbitrary::Arbitrary;
use identigen_codec::{
    BigEndian, LengthCfg, LittleEndian, Order, ReadCursor, WriteCursor,
};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Op {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I128(i128),
    F32(f32),
    F64(f64),
    Bool(bool),
    Bytes(Vec<u8>),
    Words(Vec<u32>),
    Nested(Vec<Vec<i16>>),
    Seek(usize),
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    capacity: u16,
    big_endian: bool,
    ops: Vec<Op>,
    raw: Vec<u8>,
    max_len: usize,
}

fn write_ops<E: Order>(capacity: usize, ops: &[Op]) {
    let mut buf = vec![0u8; capacity];
    let mut writer = WriteCursor::<E>::new(&mut buf);
    let mut written = Vec::new();
    let mut seeked = false;
    for op in ops {
        let before = writer.position();
        let result = match op {
            Op::U8(v) => writer.write(*v).map(|_| ()),
            Op::U16(v) => writer.write(*v).map(|_| ()),
            Op::U32(v) => writer.write(*v).map(|_| ()),
            Op::U64(v) => writer.write(*v).map(|_| ()),
            Op::I128(v) => writer.write(*v).map(|_| ()),
            Op::F32(v) => writer.write(*v).map(|_| ()),
            Op::F64(v) => writer.write(*v).map(|_| ()),
            Op::Bool(v) => writer.write(*v).map(|_| ()),
            Op::Bytes(v) => writer.write_sequence(v).map(|_| ()),
            Op::Words(v) => writer.write_sequence(v).map(|_| ()),
            Op::Nested(v) => writer.encode(v).map(|_| ()),
            Op::Seek(n) => writer.set_position(*n).map(|_| ()),
        };
        match result {
            Ok(()) if matches!(op, Op::Seek(_)) => seeked = true,
            Ok(()) => written.push(op),
            Err(_) => assert_eq!(writer.position(), before, "failed write moved the cursor"),
        }
        assert!(writer.position() <= writer.capacity());
        assert_eq!(writer.remaining(), writer.capacity() - writer.position());
    }

    // Without seeks, every successful write reads back in order and fills the written bytes.
    if seeked {
        return;
    }
    let mut reader = writer.to_reader();
    for op in written {
        match op {
            Op::U8(v) => assert_eq!(reader.read::<u8>(), Ok(*v)),
            Op::U16(v) => assert_eq!(reader.read::<u16>(), Ok(*v)),
            Op::U32(v) => assert_eq!(reader.read::<u32>(), Ok(*v)),
            Op::U64(v) => assert_eq!(reader.read::<u64>(), Ok(*v)),
            Op::I128(v) => assert_eq!(reader.read::<i128>(), Ok(*v)),
            Op::F32(v) => assert_eq!(reader.read::<f32>().map(f32::to_bits), Ok(v.to_bits())),
            Op::F64(v) => assert_eq!(reader.read::<f64>().map(f64::to_bits), Ok(v.to_bits())),
            Op::Bool(v) => assert_eq!(reader.read::<bool>(), Ok(*v)),
            Op::Bytes(v) => assert_eq!(reader.read_bytes(), Ok(v.as_slice())),
            Op::Words(v) => assert_eq!(reader.read_sequence::<u32>().as_ref(), Ok(v)),
            Op::Nested(v) => {
                let count = reader.read::<u64>().expect("missing outer count");
                assert_eq!(count, v.len() as u64);
                for inner in v {
                    assert_eq!(reader.read_sequence::<i16>().as_ref(), Ok(inner));
                }
            }
            Op::Seek(_) => unreachable!("seeks are not recorded"),
        }
    }
    assert!(reader.is_empty(), "written bytes left unread");
}

fn read_raw<E: Order>(raw: &[u8], max_len: usize) {
    let mut reader = ReadCursor::<E>::new(raw);
    let cfg = LengthCfg::at_most(max_len);
    loop {
        let before = reader.position();
        match reader.read_bytes_cfg(&cfg) {
            Ok(view) => assert!(view.len() <= max_len),
            Err(_) => {
                assert_eq!(reader.position(), before, "failed read moved the cursor");
                break;
            }
        }
    }
    let mut reader = ReadCursor::<E>::new(raw);
    if reader.read_sequence::<u32>().is_err() {
        assert_eq!(reader.position(), 0);
    }
}

fn fuzz(input: FuzzInput) {
    let capacity = input.capacity as usize;
    if input.big_endian {
        write_ops::<BigEndian>(capacity, &input.ops);
        read_raw::<BigEndian>(&input.raw, input.max_len);
    } else {
        write_ops::<LittleEndian>(capacity, &input.ops);
        read_raw::<LittleEndian>(&input.raw, input.max_len);
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
