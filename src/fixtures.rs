#[cfg(test)]
pub mod test {
    use std::collections::HashMap;
    use std::sync::mpsc::Sender;
    use std::time::Duration;

    use serde::{Deserialize, Serialize};

    use crate::{FlagValue, Flags};

    /// One optional heap layer, the shape of a nullable pointer.
    pub type P<T> = Option<Box<T>>;

    /// Follow one [`P`] layer that is expected to be filled in.
    pub fn get<T>(layer: &P<T>) -> &T {
        layer.as_deref().expect("layer should be allocated")
    }

    // -- Nested namespaces -----------------------------------------------------

    #[derive(Flags, Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
    pub struct Logging {
        /// Seconds between flushes.
        pub interval: i64,
        pub path: String,
    }

    #[derive(Flags, Debug, Default, Clone, PartialEq)]
    pub struct Socket {
        pub read_timeout: Duration,
        pub write_timeout: Duration,
    }

    #[derive(Flags, Debug, Default, Clone, PartialEq)]
    pub struct Tcp {
        pub read_timeout: Duration,
        pub socket: Socket,
    }

    #[derive(Flags, Debug, Default, Clone, PartialEq)]
    pub struct Network {
        pub read_timeout: Duration,
        pub write_timeout: Duration,
        pub tcp: Tcp,
    }

    #[derive(Flags, Debug, Default, Clone, PartialEq)]
    pub struct Cfg1 {
        pub logging: Logging,
        pub network: Network,
    }

    // -- Flattenable namespaces ------------------------------------------------

    #[derive(Flags, Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
    pub struct Auth {
        pub token: String,
        pub tag: f64,
    }

    #[derive(Flags, Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
    pub struct Credentials {
        pub user: String,
        pub password: String,
        pub auth: Auth,
    }

    #[derive(Flags, Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
    pub struct Database {
        pub db_name: String,
        pub table_name: String,
        pub credentials: Credentials,
    }

    #[derive(Flags, Debug, Default, Clone, PartialEq)]
    pub struct Cfg2 {
        pub logging: Logging,
        pub database: Database,
        string: P<String>,
    }

    // -- Renames and private members -------------------------------------------

    #[derive(Flags, Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
    pub struct C4 {
        pub table_name: String,
    }

    #[derive(Flags, Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
    pub struct C3 {
        pub db_name: String,
        pub c4: C4,
    }

    #[derive(Flags, Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
    pub struct C2 {
        pub user: String,
        pub password: i64,
        pub tag: i8,
        pub c3: C3,
    }

    #[derive(Flags, Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
    pub struct C1 {
        #[serde(rename = "label")]
        pub name: String,
        pub value: i64,
        pub float: f64,
        pub timeout: Duration,
        pub hosts: Vec<String>,
        pub ports: Vec<isize>,
        pub weights: Vec<f64>,
        pub credential: C2,

        opentimeout: Duration,
        localhost: String,
    }

    impl C1 {
        pub fn with_private(opentimeout: Duration, localhost: &str) -> Self {
            Self {
                opentimeout,
                localhost: localhost.to_string(),
                ..Self::default()
            }
        }

        pub fn opentimeout(&self) -> Duration {
            self.opentimeout
        }

        pub fn localhost(&self) -> &str {
            &self.localhost
        }
    }

    #[derive(Flags, Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
    pub struct Renamed {
        #[serde(rename = "label")]
        #[flag(rename = "title")]
        pub name: String,
        #[flag(rename = "db")]
        pub database: Database,
    }

    // -- Every primitive width -------------------------------------------------

    #[derive(Flags, Debug, Default, Clone, PartialEq)]
    pub struct CTypes {
        pub strval: String,
        pub bval: bool,
        pub f32val: f32,
        pub f64val: f64,
        pub ival: isize,
        pub i8val: i8,
        pub i16val: i16,
        pub i32val: i32,
        pub i64val: i64,
        pub uival: usize,
        pub ui8val: u8,
        pub ui16val: u16,
        pub ui32val: u32,
        pub ui64val: u64,
    }

    // -- Deep indirection ------------------------------------------------------

    #[derive(Flags, Debug, Default, Clone, PartialEq)]
    pub struct D1 {
        pub f1: P<P<P<P<String>>>>,
        pub f2: P<P<P<Vec<i64>>>>,
    }

    #[derive(Flags, Debug, Default, Clone, PartialEq)]
    pub struct D2 {
        pub f1: P<P<Vec<f64>>>,
        pub f2: P<P<P<P<P<bool>>>>>,
        pub d1: D1,
    }

    #[derive(Flags, Debug, Default, Clone, PartialEq)]
    pub struct D3 {
        pub d2: D2,
        pub f3: u64,
        pub f4: i64,
        pub hosts: Vec<String>,
    }

    #[derive(Flags, Debug, Default, Clone, PartialEq)]
    pub struct Dd {
        pub d1: D1,
        pub d2: D2,
        pub d3: D3,
    }

    #[derive(Flags, Debug, Default, Clone, PartialEq)]
    pub struct Cfg3 {
        pub d3: D3,
        pub d2: P<D2>,
    }

    #[derive(Flags, Debug, Default, Clone, PartialEq)]
    pub struct Cfg4 {
        pub name: Option<String>,
        string: Option<String>,
        int: i64,
    }

    impl Cfg4 {
        pub fn with_int(int: i64) -> Self {
            Self {
                int,
                ..Self::default()
            }
        }
    }

    #[derive(Flags, Debug, Default, Clone, PartialEq)]
    pub struct Linked {
        pub value: i64,
        pub next: P<Linked>,
    }

    // -- Type-erased targets ---------------------------------------------------

    pub trait Named {
        fn name(&self) -> String;
    }

    #[derive(Flags, Debug, Default, Clone, PartialEq)]
    pub struct S1 {
        pub host: String,
        ignore: i64,
        pub weights: Vec<f64>,
        pub f: i8,
    }

    impl S1 {
        pub fn ignoring(ignore: i64) -> Self {
            Self {
                ignore,
                ..Self::default()
            }
        }
    }

    impl Named for S1 {
        fn name(&self) -> String {
            self.host.clone()
        }
    }

    #[derive(Flags, Debug, Default, Clone, PartialEq)]
    pub struct S2 {
        pub open: bool,
        pub volume: f64,
    }

    impl Named for S2 {
        fn name(&self) -> String {
            "haha".to_string()
        }
    }

    // -- Newtypes --------------------------------------------------------------

    #[derive(FlagValue, Debug, Default, Clone, PartialEq)]
    pub struct Text(pub String);

    #[derive(FlagValue, Debug, Default, Clone, Copy, PartialEq)]
    pub struct Int(pub isize);

    #[derive(FlagValue, Debug, Default, Clone, Copy, PartialEq)]
    pub struct Int8(pub i8);

    #[derive(FlagValue, Debug, Default, Clone, Copy, PartialEq)]
    pub struct Int16(pub i16);

    #[derive(FlagValue, Debug, Default, Clone, Copy, PartialEq)]
    pub struct Int32(pub i32);

    #[derive(FlagValue, Debug, Default, Clone, Copy, PartialEq)]
    pub struct Int64(pub i64);

    #[derive(FlagValue, Debug, Default, Clone, Copy, PartialEq)]
    pub struct Float(pub f64);

    #[derive(FlagValue, Debug, Default, Clone, Copy, PartialEq)]
    pub struct Float32(pub f32);

    #[derive(FlagValue, Debug, Default, Clone, Copy, PartialEq)]
    pub struct Uint(pub usize);

    #[derive(FlagValue, Debug, Default, Clone, Copy, PartialEq)]
    pub struct Uint8(pub u8);

    #[derive(FlagValue, Debug, Default, Clone, Copy, PartialEq)]
    pub struct Uint16(pub u16);

    #[derive(FlagValue, Debug, Default, Clone, Copy, PartialEq)]
    pub struct Uint32(pub u32);

    #[derive(FlagValue, Debug, Default, Clone, Copy, PartialEq)]
    pub struct Uint64(pub u64);

    #[derive(FlagValue, Debug, Default, Clone, Copy, PartialEq)]
    pub struct Switch(pub bool);

    #[derive(Flags, Debug, Default, Clone, PartialEq)]
    pub struct Cfg5 {
        pub s: Text,
        pub ps: P<Text>,
        pub i: Int,
        pub pi: P<Int>,
        pub i8: Int8,
        pub pi8: P<Int8>,
        pub i16: Int16,
        pub pi16: P<Int16>,
        pub i32: Int32,
        pub pi32: P<Int32>,
        pub i64: Int64,
        pub pi64: P<Int64>,
        pub f: Float,
        pub pf: P<Float>,
        pub u: Uint,
        pub u8: Uint8,
        pub pu8: P<Uint8>,
        pub u16: Uint16,
        pub pu16: P<Uint16>,
        pub u32: Uint32,
        pub pu32: P<Uint32>,
        pub pu: P<Uint>,
        pub u64: Uint64,
        pub pu64: P<Uint64>,
        pub b: Switch,
        pub pb: P<bool>,
        pub f32: Float32,
        pub pf32: P<Float32>,
    }

    // -- Unsupported members ---------------------------------------------------

    #[derive(Flags, Debug)]
    pub struct Shapes {
        pub env: HashMap<String, String>,
        pub hook: fn(i64) -> String,
        pub level: i64,
        secret: String,
        #[flag(skip)]
        pub ignored: Vec<u8>,
    }

    impl Shapes {
        pub fn new() -> Self {
            Self {
                env: HashMap::new(),
                hook: |n| n.to_string(),
                level: 0,
                secret: String::new(),
                ignored: Vec::new(),
            }
        }
    }

    #[derive(Flags, Debug, Default)]
    pub struct WithMap {
        pub env: HashMap<String, String>,
        pub level: i64,
    }

    #[derive(Flags, Debug)]
    pub struct WithChannel {
        pub env: Sender<i64>,
        pub level: i64,
    }

    #[derive(Flags, Debug)]
    pub struct WithFn {
        pub env: fn(i64) -> String,
        pub level: i64,
    }

    // -- Small shapes for parser tests -----------------------------------------

    #[derive(Flags, Debug, Default, Clone, PartialEq)]
    pub struct Toggles {
        pub name: String,
        pub level: i64,
        pub verbose: bool,
        pub ratio: f64,
    }

    #[derive(Flags, Debug, Default, Clone, PartialEq)]
    pub struct Slices {
        /// level per stage
        pub levels: Vec<i64>,
        pub weights: Vec<f64>,
    }

    #[derive(Flags, Debug, Default, Clone, PartialEq)]
    pub struct Hosts {
        pub hosts: Vec<String>,
    }

    #[derive(Flags, Debug, Default, Clone, PartialEq)]
    pub struct Levels {
        pub levels: Vec<isize>,
    }

    #[derive(Flags, Debug, Default, Clone, PartialEq)]
    pub struct Weights {
        pub levels: Vec<f64>,
    }

    #[derive(Flags, Debug, Default, Clone, PartialEq)]
    pub struct Collide {
        pub database: Database,
        pub auth: Auth,
    }

    #[derive(Flags, Debug, Default, Clone, PartialEq)]
    pub struct LazyCollide {
        pub auth: P<Auth>,
        pub token: String,
    }
}
