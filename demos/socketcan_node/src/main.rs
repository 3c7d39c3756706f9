//! A standalone CAN-FiX node bound to a SocketCAN interface, for exercising `canfix-node` against
//! real or virtual CAN hardware (`vcan0`, etc).

use std::sync::mpsc;
use std::sync::{Mutex, OnceLock};

use clap::Parser;
use socketcan::tokio::CanSocket;
use socketcan::{CanFrame, EmbeddedFrame, Frame as _, Id as SocketCanId, StandardId};

use canfix_node::{Frame, Id, NodeContext};

#[derive(Parser, Debug)]
struct Args {
    /// SocketCAN interface name, e.g. "vcan0" or "can0".
    socket: String,
    #[clap(long, default_value_t = 0x23)]
    node_id: u8,
    #[clap(long, default_value_t = 0x01)]
    device: u8,
    #[clap(long, default_value_t = 0x01)]
    revision: u8,
    #[clap(long, default_value_t = 0x000001)]
    model: u32,
}

static OUTBOUND: OnceLock<Mutex<mpsc::Sender<Frame>>> = OnceLock::new();

fn write_frame(frame: Frame) -> i32 {
    match OUTBOUND.get() {
        Some(tx) => match tx.lock().unwrap().send(frame) {
            Ok(()) => 0,
            Err(_) => -1,
        },
        None => -1,
    }
}

fn on_alarm(node: u8, code: u16, payload: &[u8]) {
    log::warn!("alarm from node {node}: code {code:#x}, payload {payload:?}");
}

fn on_parameter(parameter: canfix_node::Parameter) {
    log::debug!(
        "parameter {:#x} from node {}: {:?}",
        parameter.kind().raw(),
        parameter.node(),
        parameter.data()
    );
}

fn on_node_set(new_node: u8) {
    log::info!("node reassigned to {new_node:#x}; host should persist this across reboots");
}

fn socketcan_frame_to_canfix(frame: CanFrame) -> Option<Frame> {
    let raw = match frame.id() {
        SocketCanId::Standard(id) => id.as_raw(),
        SocketCanId::Extended(_) => return None,
    };
    let id = Id::new(raw).ok()?;
    match frame {
        CanFrame::Data(data_frame) => Frame::new(id, data_frame.data()).ok(),
        _ => None,
    }
}

fn canfix_frame_to_socketcan(frame: Frame) -> CanFrame {
    let std_id = StandardId::new(frame.id().raw()).expect("canfix-node ids are always 11-bit");
    CanFrame::new(std_id, frame.data()).expect("canfix-node frames are never oversized")
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    let node: &'static NodeContext =
        Box::leak(Box::new(NodeContext::init(
            args.node_id,
            args.device,
            args.revision,
            args.model,
        )));
    node.handlers().set_write_frame(&write_frame);
    node.handlers().set_alarm(&on_alarm);
    node.handlers().set_parameter(&on_parameter);
    node.handlers().set_node_set(&on_node_set);

    let (tx, rx) = mpsc::channel();
    OUTBOUND.set(Mutex::new(tx)).ok();

    let recv_socket = CanSocket::open(&args.socket).expect("failed to open CAN interface");
    tokio::spawn(async move {
        loop {
            match recv_socket.read_frame().await {
                Ok(frame) => {
                    if let Some(frame) = socketcan_frame_to_canfix(frame) {
                        if let Err(e) = node.exec(frame) {
                            log::warn!("exec failed: {e}");
                        }
                    }
                }
                Err(e) => log::warn!("socket read error: {e}"),
            }
        }
    });

    log::info!(
        "canfix node {:#x} online on {}",
        node.node(),
        args.socket
    );

    let send_socket = CanSocket::open(&args.socket).expect("failed to open CAN interface");
    loop {
        let Ok(frame) = rx.recv() else { break };
        let socketcan_frame = canfix_frame_to_socketcan(frame);
        if let Err(e) = send_socket.write_frame(socketcan_frame).await {
            log::warn!("socket write error: {e}");
        }
    }
}
