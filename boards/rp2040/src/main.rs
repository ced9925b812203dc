#![no_main]
#![no_std]

mod macros;

use defmt::*;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_futures::join::join;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::{Driver, InterruptHandler};
use embassy_time::Delay;
use hidseq::{UsbConfig, UsbKeyboard, add_keyboard_writer, new_usb_builder, run};
use panic_probe as _;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => InterruptHandler<USB>;
});

const USB_CONFIG: UsbConfig<'static> = UsbConfig {
    vid: 0x1209,
    pid: 0x0001,
    manufacturer: "hidseq",
    product_name: "hidseq Keyboard",
    serial_number: "hidseq:rp2040:000001",
    ..UsbConfig::new()
};

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("hidseq start!");
    let p = embassy_rp::init(Default::default());

    // Create the usb driver, from the HAL
    let driver = Driver::new(p.USB, Irqs);

    let mut builder = new_usb_builder(driver, USB_CONFIG);
    let writer = add_keyboard_writer(&mut builder);
    let mut usb = builder.build();
    let keyboard = UsbKeyboard::new(writer, &USB_CONFIG);

    let sequence = async {
        match run(&macros::COMMAND, keyboard, Delay).await {
            Ok(()) => info!("Macro finished"),
            Err(e) => error!("Macro failed: {:?}", e),
        }
    };

    // The usb device keeps running after the macro, so the host sees an idle keyboard
    join(usb.run(), sequence).await;
}
