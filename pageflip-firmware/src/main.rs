//! Pageflip - SSD1306 demo firmware
//!
//! Drives a 1-bpp OLED on I2C0 of an RP2040. The main task draws a
//! labelled uptime clock into the back buffer once per second; the refresh task
//! pushes each finished frame to the panel.

#![no_std]
#![no_main]

use core::cell::RefCell;
use core::fmt::Write as _;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, NoopRawMutex};
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Delay, Duration, Ticker};
use embedded_alloc::LlffHeap as Heap;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use pageflip_core::font::ASCII_3X5;
use pageflip_core::{Engine, EngineConfig, Surface};
use pageflip_display::{FrameSink, PanelConfig, Ssd1306};
use pageflip_hal::{EmbeddedHalBus, I2cBusConfig};

include!(concat!(env!("OUT_DIR"), "/panel.rs"));

// Heap allocator for the frame buffers
#[global_allocator]
static HEAP: Heap = Heap::empty();

// Heap size: 4KB (two 1025-byte frames at 128x64)
const HEAP_SIZE: usize = 4 * 1024;

/// Probe with a NOP command; the RP2040 driver rejects empty writes
const PROBE: &[u8] = &[0x00, 0xE3];

/// Contrast used for the dimmed half of each minute
const DIM_CONTRAST: u8 = 0x10;

type Bus = EmbeddedHalBus<I2c<'static, I2C0, i2c::Blocking>>;
type Panel = Ssd1306<Bus, Delay>;
type SharedPanel = Mutex<NoopRawMutex, RefCell<Panel>>;

static ENGINE: StaticCell<Engine<CriticalSectionRawMutex>> = StaticCell::new();
static PANEL_CELL: StaticCell<SharedPanel> = StaticCell::new();

/// Frame sink borrowing the panel between refreshes
struct PanelSink(&'static SharedPanel);

impl FrameSink for PanelSink {
    fn flush(&mut self, frame: &[u8]) {
        self.0.lock(|panel| panel.borrow_mut().flush(frame));
    }
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Pageflip firmware starting...");

    init_heap();

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // I2C0: GP5 = SCL, GP4 = SDA
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = PANEL.scl_speed_hz;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);

    let bus = EmbeddedHalBus::with_probe_payload(i2c, PROBE);
    let mut panel = Ssd1306::new(bus, &I2cBusConfig::with_pins(5, 4), PANEL, Delay);
    if !panel.is_present() {
        warn!("No panel at {=u8:#x}, frames will not be sent", PANEL.address);
        return;
    }
    panel.power_on();

    let surface = unwrap!(Surface::new(PANEL.width, PANEL.height));
    let engine: &'static Engine<CriticalSectionRawMutex> =
        ENGINE.init(Engine::new(surface, EngineConfig::default()));
    let panel: &'static SharedPanel = PANEL_CELL.init(Mutex::new(RefCell::new(panel)));

    spawner.spawn(refresh_task(engine, PanelSink(panel))).unwrap();
    info!("Refresh task spawned");

    let mut canvas = unwrap!(engine.canvas(&ASCII_3X5));
    let baseline = (PANEL.height as i32 + 5) / 2;
    let mut ticker = Ticker::every(Duration::from_secs(1));
    let mut seconds: u32 = 0;

    loop {
        let mut text: heapless::String<12> = heapless::String::new();
        let _ = core::write!(text, "Up {:02}:{:02}", seconds / 60 % 60, seconds % 60);

        canvas.draw_rect(0, 0, PANEL.width as u32, 1, true);
        canvas.draw_rect(0, PANEL.height as i32 - 1, PANEL.width as u32, 1, true);
        canvas.set_cursor(4, baseline);
        canvas.write(text.as_bytes());
        canvas.swap_and_signal().await;

        // Contrast changes share the bus with the refresh task
        if seconds % 30 == 0 {
            let contrast = if seconds % 60 == 0 {
                PANEL.contrast
            } else {
                DIM_CONTRAST
            };
            canvas.stop();
            panel.lock(|panel| panel.borrow_mut().set_contrast(contrast));
            canvas.start();
            debug!("Contrast set to {=u8:#x}", contrast);
        }

        seconds = seconds.wrapping_add(1);
        ticker.next().await;
    }
}

/// Refresh task - pushes each swapped frame to the panel
#[embassy_executor::task]
async fn refresh_task(engine: &'static Engine<CriticalSectionRawMutex>, sink: PanelSink) {
    info!("Refresh task started");
    engine.refresher(sink).run().await
}

/// Initialize the heap allocator
fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}
