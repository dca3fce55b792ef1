use std::{
    cell::RefCell,
    collections::HashMap,
    io,
    path::{Path, PathBuf},
    rc::Rc,
    sync::Once,
};

use aquarium_scene::{
    Matrix4, Vector2, Vector3, Vector4,
    config::SceneConfig,
    pipelines::transparent::{BlendMode, RasterState},
    resources::{
        decode::{DecodedImage, ImageLoader},
        mesh::{MeshLibrary, Shape},
        texture::{TextureBackend, TextureError},
    },
    scene::SCENE_TEXTURES,
    shader::{UniformSink, UniformTable, UniformValue},
};
use image::ImageError;

/// What a [`FakeBackend`] was asked to do.
#[derive(Debug, Default)]
pub(crate) struct BackendLog {
    pub created: Vec<(u32, String)>,
    pub bound: Vec<(u32, u32)>,
    pub deleted: Vec<u32>,
}

/// Texture backend handing out sequential ids, starting at 100.
#[derive(Clone, Debug, Default)]
pub(crate) struct FakeBackend {
    pub log: Rc<RefCell<BackendLog>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextureBackend for FakeBackend {
    type Handle = u32;

    fn create(&mut self, _: &DecodedImage, tag: &str) -> Result<u32, TextureError> {
        let mut log = self.log.borrow_mut();
        let id = 100 + log.created.len() as u32;
        log.created.push((id, tag.to_string()));
        Ok(id)
    }

    fn bind_to_unit(&mut self, handle: &u32, unit: u32) {
        self.log.borrow_mut().bound.push((*handle, unit));
    }

    fn delete(&mut self, handle: u32) {
        self.log.borrow_mut().deleted.push(handle);
    }
}

pub(crate) fn rgb_image(width: u32, height: u32) -> DecodedImage {
    DecodedImage::new(vec![200; (width * height * 3) as usize], width, height, 3)
}

pub(crate) fn rgba_image(width: u32, height: u32) -> DecodedImage {
    DecodedImage::new(vec![200; (width * height * 4) as usize], width, height, 4)
}

pub(crate) fn grey_alpha_image(width: u32, height: u32) -> DecodedImage {
    DecodedImage::new(vec![200; (width * height * 2) as usize], width, height, 2)
}

/// Image loader serving pre-decoded images; unknown paths fail like a missing file.
#[derive(Clone, Debug, Default)]
pub(crate) struct MemoryLoader {
    images: HashMap<PathBuf, DecodedImage>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<PathBuf>, image: DecodedImage) -> Self {
        self.images.insert(path.into(), image);
        self
    }

    /// Every scene texture present under `config`'s asset root, except `skip`.
    pub fn scene(config: &SceneConfig, skip: &[&str]) -> Self {
        SCENE_TEXTURES
            .iter()
            .filter(|(tag, _)| !skip.contains(tag))
            .fold(Self::new(), |loader, (_, file)| {
                loader.with(config.asset_path(file), rgb_image(4, 4))
            })
    }
}

impl ImageLoader for MemoryLoader {
    fn decode(&self, path: &Path) -> Result<DecodedImage, ImageError> {
        self.images.get(path).cloned().ok_or_else(|| {
            ImageError::IoError(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            ))
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Event {
    Uniform(String, UniformValue),
    Load(Shape),
    Draw(Shape),
    Blend(BlendMode),
}

pub(crate) type EventLog = Rc<RefCell<Vec<Event>>>;

/// Uniform sink that keeps the latest values and logs every write in order.
#[derive(Default)]
pub(crate) struct RecordingSink {
    pub table: UniformTable,
    pub log: EventLog,
}

impl RecordingSink {
    pub fn new(log: &EventLog) -> Self {
        Self {
            table: UniformTable::new(),
            log: log.clone(),
        }
    }

    fn record(&mut self, name: &str, value: UniformValue) {
        self.log
            .borrow_mut()
            .push(Event::Uniform(name.to_string(), value));
    }
}

impl UniformSink for RecordingSink {
    fn set_float(&mut self, name: &str, value: f32) {
        self.table.set_float(name, value);
        self.record(name, UniformValue::Float(value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.table.set_int(name, value);
        self.record(name, UniformValue::Int(value));
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.table.set_bool(name, value);
        self.record(name, UniformValue::Bool(value));
    }

    fn set_vec2(&mut self, name: &str, value: Vector2<f32>) {
        self.table.set_vec2(name, value);
        self.record(name, UniformValue::Vec2(value));
    }

    fn set_vec3(&mut self, name: &str, value: Vector3<f32>) {
        self.table.set_vec3(name, value);
        self.record(name, UniformValue::Vec3(value));
    }

    fn set_vec4(&mut self, name: &str, value: Vector4<f32>) {
        self.table.set_vec4(name, value);
        self.record(name, UniformValue::Vec4(value));
    }

    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) {
        self.table.set_mat4(name, value);
        self.record(name, UniformValue::Mat4(value));
    }

    fn set_sampler(&mut self, name: &str, unit: u32) {
        self.table.set_sampler(name, unit);
        self.record(name, UniformValue::Sampler(unit));
    }
}

/// Mesh library and raster state logging into the same [`EventLog`].
pub(crate) struct RecordingGpu {
    pub log: EventLog,
}

impl RecordingGpu {
    pub fn new(log: &EventLog) -> Self {
        Self { log: log.clone() }
    }
}

impl MeshLibrary for RecordingGpu {
    fn load_mesh(&mut self, shape: Shape) {
        self.log.borrow_mut().push(Event::Load(shape));
    }

    fn draw_mesh(&mut self, shape: Shape) {
        self.log.borrow_mut().push(Event::Draw(shape));
    }
}

impl RasterState for RecordingGpu {
    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.log.borrow_mut().push(Event::Blend(mode));
    }
}

pub(crate) fn new_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Latest value written to `name` before event index `before`.
pub(crate) fn last_uniform(events: &[Event], before: usize, name: &str) -> Option<UniformValue> {
    events[..before].iter().rev().find_map(|event| match event {
        Event::Uniform(n, value) if n == name => Some(*value),
        _ => None,
    })
}

pub(crate) fn assert_mat_eq(actual: Matrix4<f32>, expected: Matrix4<f32>) {
    let a: &[[f32; 4]; 4] = actual.as_ref();
    let e: &[[f32; 4]; 4] = expected.as_ref();
    for c in 0..4 {
        for r in 0..4 {
            assert!(
                (a[c][r] - e[c][r]).abs() < 1e-5,
                "matrices differ at column {c}, row {r}: {actual:?} != {expected:?}"
            );
        }
    }
}

pub(crate) fn assert_vec_eq(actual: Vector3<f32>, expected: Vector3<f32>) {
    assert!(
        (actual.x - expected.x).abs() < 1e-5
            && (actual.y - expected.y).abs() < 1e-5
            && (actual.z - expected.z).abs() < 1e-5,
        "{actual:?} != {expected:?}"
    );
}

thread_local! {
    static CAPTURED_LOGS: RefCell<Vec<(log::Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Logger keeping every record emitted on the current test thread.
struct LogCapture;

impl log::Log for LogCapture {
    fn enabled(&self, _: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        CAPTURED_LOGS.with(|logs| {
            logs.borrow_mut()
                .push((record.level(), format!("{}", record.args())))
        });
    }

    fn flush(&self) {}
}

static LOGGER: LogCapture = LogCapture;
static INSTALL_LOGGER: Once = Once::new();

/// Installs the capturing logger once per test binary and forgets what this
/// thread logged so far.
pub(crate) fn capture_logs() {
    INSTALL_LOGGER.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }
    });
    CAPTURED_LOGS.with(|logs| logs.borrow_mut().clear());
}

/// Messages logged on this thread at `level` since [`capture_logs`].
pub(crate) fn captured_logs(level: log::Level) -> Vec<String> {
    CAPTURED_LOGS.with(|logs| {
        logs.borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message.clone())
            .collect()
    })
}
