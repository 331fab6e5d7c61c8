//! Stable 64-bit identities for UI elements.
//!
//! A [`Key`] is derived from the source location of the call site plus an
//! optional chain of seeds (loop indices, parent keys, pointers). The same
//! call site with the same seeds yields the same key every frame, which is
//! what lets the engine correlate a box with its previous-frame instance.

const MIX_M: u64 = 0xc6a4_a793_5bd1_e995;
const MIX_R: u32 = 47;

/// Combine two 64-bit values into one (MurmurHash64A mixing rounds).
///
/// Pure and non-commutative: `hash_key(a, b) != hash_key(b, a)` in general.
pub const fn hash_key(a: u64, b: u64) -> u64 {
    let mut h: u64 = 16u64.wrapping_mul(MIX_M);
    h = mix_in(h, a);
    h = mix_in(h, b);
    h ^= h >> MIX_R;
    h = h.wrapping_mul(MIX_M);
    h ^= h >> MIX_R;
    h
}

const fn mix_in(mut h: u64, mut k: u64) -> u64 {
    k = k.wrapping_mul(MIX_M);
    k ^= k >> MIX_R;
    k = k.wrapping_mul(MIX_M);
    h ^= k;
    h.wrapping_mul(MIX_M)
}

/// FNV-1a over bytes, used to turn a call-site string into a seed.
const fn hash_bytes(bytes: &[u8]) -> u64 {
    let mut h: u64 = 0xcbf2_9ce4_8422_2325;
    let mut i = 0;
    while i < bytes.len() {
        h ^= bytes[i] as u64;
        h = h.wrapping_mul(0x0000_0100_0000_01b3);
        i += 1;
    }
    h
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(pub u64);

impl Key {
    /// Reserved value meaning "no key".
    pub const INVALID: Key = Key(0);

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    /// Key for a source location string such as `"src/app.rs:10:5"`.
    pub const fn from_site(site: &str) -> Key {
        Key(hash_key(hash_bytes(site.as_bytes()), 0))
    }

    /// Key for the caller's source location.
    #[track_caller]
    pub fn caller() -> Key {
        let loc = std::panic::Location::caller();
        let file = hash_bytes(loc.file().as_bytes());
        let line_col = ((loc.line() as u64) << 32) | loc.column() as u64;
        Key(hash_key(hash_key(file, line_col), 0))
    }

    /// Derive a child key from this one and an extra seed.
    #[inline]
    pub fn with(self, seed: impl KeySeed) -> Key {
        Key(hash_key(self.0, seed.key_seed()))
    }

    #[inline]
    pub fn hash_int(self, value: u64) -> Key {
        Key(hash_key(self.0, value))
    }

    #[inline]
    pub fn hash_ptr<T: ?Sized>(self, ptr: *const T) -> Key {
        Key(hash_key(self.0, ptr as *const () as usize as u64))
    }
}

/// Values usable as a key seed.
pub trait KeySeed {
    fn key_seed(&self) -> u64;
}

impl KeySeed for Key {
    fn key_seed(&self) -> u64 {
        self.0
    }
}

macro_rules! int_seed {
    ($($t:ty),*) => {
        $(impl KeySeed for $t {
            fn key_seed(&self) -> u64 {
                *self as u64
            }
        })*
    };
}

int_seed!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl KeySeed for &str {
    fn key_seed(&self) -> u64 {
        hash_bytes(self.as_bytes())
    }
}

impl KeySeed for String {
    fn key_seed(&self) -> u64 {
        hash_bytes(self.as_bytes())
    }
}

/// Build a [`Key`] unique to this source location, optionally chained with seeds.
///
/// ```
/// use brisk_core::{key, Key};
/// let a = key!();
/// let b = key!();
/// assert_ne!(a, b);
/// let rows: Vec<Key> = (0..3).map(|i| key!(i)).collect();
/// assert_ne!(rows[0], rows[1]);
/// ```
#[macro_export]
macro_rules! key {
    () => {{
        const SITE: $crate::Key =
            $crate::Key::from_site(concat!(file!(), ":", line!(), ":", column!()));
        SITE
    }};
    ($($seed:expr),+ $(,)?) => {{
        let key = $crate::key!();
        $(let key = key.with($seed);)+
        key
    }};
}
