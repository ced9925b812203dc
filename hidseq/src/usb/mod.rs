//! USB HID boot keyboard, the hardware [`KeyboardDevice`].

pub mod descriptor;

use embassy_time::{Duration, with_timeout};
use embassy_usb::class::hid::{
    Config as HidConfig, HidBootProtocol, HidSubclass, HidWriter, ReportId, RequestHandler, State,
};
use embassy_usb::control::OutResponse;
use embassy_usb::driver::Driver;
use embassy_usb::{Builder, Handler};
use static_cell::StaticCell;
use usbd_hid::descriptor::SerializedDescriptor;

use crate::action::KeyCode;
use crate::config::UsbConfig;
use crate::device::{HidError, KeyboardDevice};
use crate::hid_state::ReportState;
use descriptor::KeyboardReport;

/// Size of a serialized [`KeyboardReport`]
pub const KEYBOARD_REPORT_SIZE: usize = 8;

const USB_BUF_SIZE: usize = 128;

/// Keyboard that sends one report per key change over a HID interrupt endpoint
pub struct UsbKeyboard<'d, D: Driver<'d>> {
    writer: HidWriter<'d, D, KEYBOARD_REPORT_SIZE>,
    report: ReportState,
    enumeration_timeout: Duration,
}

impl<'d, D: Driver<'d>> UsbKeyboard<'d, D> {
    pub fn new(writer: HidWriter<'d, D, KEYBOARD_REPORT_SIZE>, usb_config: &UsbConfig) -> Self {
        Self {
            writer,
            report: ReportState::new(),
            enumeration_timeout: usb_config.enumeration_timeout,
        }
    }

    async fn send_report(&mut self) -> Result<(), HidError> {
        let report: KeyboardReport = self.report.report();
        trace!("Sending keyboard report: {:?}", report);
        self.writer
            .write_serialize(&report)
            .await
            .map_err(HidError::UsbEndpointError)
    }
}

impl<'d, D: Driver<'d>> KeyboardDevice for UsbKeyboard<'d, D> {
    async fn init(&mut self) -> Result<(), HidError> {
        if with_timeout(self.enumeration_timeout, self.writer.ready()).await.is_err() {
            error!("Host did not configure the keyboard in {}ms", self.enumeration_timeout.as_millis());
            return Err(HidError::NotConfigured);
        }
        info!("Keyboard configured by host");
        self.report.clear();
        self.send_report().await
    }

    async fn shutdown(&mut self) -> Result<(), HidError> {
        if !self.report.is_empty() {
            warn!("Keys held at shutdown, clearing the report");
        }
        self.report.clear();
        self.send_report().await
    }

    async fn press(&mut self, key: KeyCode) -> Result<(), HidError> {
        self.report.press(key)?;
        self.send_report().await
    }

    async fn release(&mut self, key: KeyCode) -> Result<(), HidError> {
        self.report.release(key)?;
        self.send_report().await
    }

    async fn release_all(&mut self) -> Result<(), HidError> {
        self.report.clear();
        self.send_report().await
    }
}

/// Create the usb device builder.
///
/// The descriptor buffers are statics, so this can be called only once.
pub fn new_usb_builder<'d, D: Driver<'d>>(driver: D, usb_config: UsbConfig<'d>) -> Builder<'d, D> {
    let mut config = embassy_usb::Config::new(usb_config.vid, usb_config.pid);
    config.manufacturer = Some(usb_config.manufacturer);
    config.product = Some(usb_config.product_name);
    config.serial_number = Some(usb_config.serial_number);
    config.max_power = 100;
    config.max_packet_size_0 = 64;

    static CONFIG_DESC: StaticCell<[u8; USB_BUF_SIZE]> = StaticCell::new();
    static BOS_DESC: StaticCell<[u8; 16]> = StaticCell::new();
    static MSOS_DESC: StaticCell<[u8; 16]> = StaticCell::new();
    static CONTROL_BUF: StaticCell<[u8; USB_BUF_SIZE]> = StaticCell::new();

    let mut builder = Builder::new(
        driver,
        config,
        &mut CONFIG_DESC.init([0; USB_BUF_SIZE])[..],
        &mut BOS_DESC.init([0; 16])[..],
        &mut MSOS_DESC.init([0; 16])[..],
        &mut CONTROL_BUF.init([0; USB_BUF_SIZE])[..],
    );

    static DEVICE_HANDLER: StaticCell<UsbDeviceHandler> = StaticCell::new();
    builder.handler(DEVICE_HANDLER.init(UsbDeviceHandler {}));

    builder
}

/// Add the boot keyboard interface to the builder. Can be called only once.
pub fn add_keyboard_writer<D: Driver<'static>>(
    builder: &mut Builder<'static, D>,
) -> HidWriter<'static, D, KEYBOARD_REPORT_SIZE> {
    static KEYBOARD_STATE: StaticCell<State> = StaticCell::new();
    static KEYBOARD_HANDLER: StaticCell<UsbRequestHandler> = StaticCell::new();

    let state = KEYBOARD_STATE.init(State::new());
    let request_handler = KEYBOARD_HANDLER.init(UsbRequestHandler {});

    let hid_config = HidConfig {
        report_descriptor: KeyboardReport::desc(),
        request_handler: Some(request_handler),
        poll_ms: 1,
        max_packet_size: 64,
        hid_subclass: HidSubclass::Boot,
        hid_boot_protocol: HidBootProtocol::Keyboard,
    };

    HidWriter::new(builder, state, hid_config)
}

struct UsbRequestHandler {}

impl RequestHandler for UsbRequestHandler {
    fn set_report(&mut self, id: ReportId, data: &[u8]) -> OutResponse {
        // LED state from the host, not used
        debug!("Set report for {:?}: {:?}", id, data);
        OutResponse::Accepted
    }
}

struct UsbDeviceHandler {}

impl Handler for UsbDeviceHandler {
    fn enabled(&mut self, enabled: bool) {
        if enabled {
            info!("Device enabled");
        } else {
            info!("Device disabled");
        }
    }

    fn reset(&mut self) {
        info!("Bus reset");
    }

    fn addressed(&mut self, addr: u8) {
        info!("USB address set to: {}", addr);
    }

    fn configured(&mut self, configured: bool) {
        if configured {
            info!("Device configured");
        } else {
            info!("Device is no longer configured");
        }
    }

    fn suspended(&mut self, suspended: bool) {
        if suspended {
            info!("Device suspended");
        } else {
            info!("Device resumed");
        }
    }
}
