//! The Node Specific Message request/response state machine (§4.2).
//!
//! Each opcode is handled by its own function with its own addressing rule; none of them fall
//! into one another. The original C dispatch is missing a `break` after Two-Way and falls through
//! into Config Set — that is a defect in the source, not a behavior to reproduce, and
//! `tests/scenarios.rs` has a regression test pinning it down.

use canfix_common::{
    constants::{nsm_opcode, nsm_status},
    Frame, MAX_PARAMETER_DATA_LEN,
};
use defmt_or_log::{debug, info, warn};

use crate::node::NodeContext;

/// Handle one NSM payload (`data[0] == opcode`). Returns the reply frame to emit, if any.
///
/// `requester` is the node id the sender stamped into the inbound identifier (`inbound_id -
/// NSM_START`), carried forward into byte 1 of any reply.
pub(crate) fn handle(ctx: &NodeContext, requester: u8, data: &[u8]) -> Option<Frame> {
    let opcode = *data.first()?;
    debug!("nsm opcode {} from requester {}", opcode, requester);
    match opcode {
        nsm_opcode::IDENTIFY => identify(ctx, requester, data),
        nsm_opcode::BITRATE => bitrate(ctx, requester, data),
        nsm_opcode::NODE_SET => node_set(ctx, requester, data),
        nsm_opcode::DISABLE => {
            enable_disable(ctx, data, false);
            None
        }
        nsm_opcode::ENABLE => {
            enable_disable(ctx, data, true);
            None
        }
        nsm_opcode::REPORT => {
            report(ctx, data);
            None
        }
        nsm_opcode::FIRMWARE => firmware(ctx, requester, data),
        nsm_opcode::TWOWAY => twoway(ctx, requester, data),
        nsm_opcode::CONFIG_SET => config_set(ctx, requester, data),
        nsm_opcode::CONFIG_GET => config_get(ctx, requester, data),
        // Status and Description are outbound-only; the Parameter Set slots are reserved; any
        // other value is unknown. All are silently ignored on the inbound side.
        _ => None,
    }
}

fn addressed_or_broadcast(ctx: &NodeContext, data: &[u8]) -> Option<bool> {
    let target = *data.get(1)?;
    Some(target == ctx.node() || target == 0)
}

fn addressed_exactly(ctx: &NodeContext, data: &[u8]) -> Option<bool> {
    let target = *data.get(1)?;
    Some(target == ctx.node())
}

fn identify(ctx: &NodeContext, requester: u8, data: &[u8]) -> Option<Frame> {
    if !addressed_or_broadcast(ctx, data)? {
        return None;
    }
    let model = ctx.model();
    let tail = [
        0x01,
        ctx.device(),
        ctx.revision(),
        model as u8,
        (model >> 8) as u8,
        (model >> 16) as u8,
    ];
    Some(ctx.nsm_reply(nsm_opcode::IDENTIFY, requester, &tail))
}

fn bitrate(ctx: &NodeContext, requester: u8, data: &[u8]) -> Option<Frame> {
    if !addressed_or_broadcast(ctx, data)? {
        return None;
    }
    let preset = *data.get(2)?;
    if !(1..=4).contains(&preset) {
        warn!("bitrate request with out-of-range preset {}", preset);
        return Some(ctx.nsm_reply(
            nsm_opcode::BITRATE,
            requester,
            &[nsm_status::GENERIC_ERROR],
        ));
    }
    match ctx.handlers().bitrate.load() {
        Some(f) => {
            info!("bitrate change accepted: preset {}", preset);
            f(preset);
            None
        }
        None => {
            warn!("bitrate request dropped: no bitrate handler registered");
            Some(ctx.nsm_reply(
                nsm_opcode::BITRATE,
                requester,
                &[nsm_status::GENERIC_ERROR],
            ))
        }
    }
}

fn node_set(ctx: &NodeContext, requester: u8, data: &[u8]) -> Option<Frame> {
    // Node Set is never answered on broadcast: the target byte must match exactly.
    if !addressed_exactly(ctx, data)? {
        return None;
    }
    let new_node = *data.get(2)?;
    if new_node == 0 {
        warn!("node set request rejected: new node id is 0");
        return Some(ctx.nsm_reply(
            nsm_opcode::NODE_SET,
            requester,
            &[nsm_status::GENERIC_ERROR],
        ));
    }
    info!("node id reassigned from {} to {}", ctx.node(), new_node);
    ctx.set_node(new_node);
    if let Some(f) = ctx.handlers().node_set.load() {
        f(new_node);
    }
    // self.node has already changed, so the reply's identifier carries the new address.
    Some(ctx.nsm_reply(nsm_opcode::NODE_SET, requester, &[nsm_status::SUCCESS]))
}

/// Disable (`enable = false`) and Enable (`enable = true`) both toggle one bit of the
/// host-persisted parameter-enable bitmap, addressed by a 16-bit parameter id in `data[2..4]`
/// (§4.5, Design Notes). Disable is answered on broadcast; Enable is not.
fn enable_disable(ctx: &NodeContext, data: &[u8], enable: bool) -> Option<()> {
    let target = *data.get(1)?;
    let allow_broadcast = !enable;
    if !(target == ctx.node() || (allow_broadcast && target == 0)) {
        return None;
    }
    let param_id = u16::from_le_bytes([*data.get(2)?, *data.get(3)?]);
    let byte_index = (param_id / 8) as u8;
    let bit = 1u8 << (param_id % 8);
    let opcode_name = if enable { "enable" } else { "disable" };
    let Some(read) = ctx.handlers().enable_bitmap_read.load() else {
        warn!("{} request dropped: no enable-bitmap handlers registered", opcode_name);
        return None;
    };
    let Some(write) = ctx.handlers().enable_bitmap_write.load() else {
        warn!("{} request dropped: no enable-bitmap handlers registered", opcode_name);
        return None;
    };
    let byte = read(byte_index);
    let updated = if enable { byte & !bit } else { byte | bit };
    write(byte_index, updated);
    Some(())
}

fn report(ctx: &NodeContext, data: &[u8]) -> Option<()> {
    if !addressed_or_broadcast(ctx, data)? {
        return None;
    }
    let Some(f) = ctx.handlers().report.load() else {
        warn!("report request dropped: no report handler registered");
        return None;
    };
    f();
    Some(())
}

fn firmware(ctx: &NodeContext, requester: u8, data: &[u8]) -> Option<Frame> {
    if !addressed_or_broadcast(ctx, data)? {
        return None;
    }
    let _verification_code = u16::from_le_bytes([*data.get(2)?, *data.get(3)?]);
    let channel = *data.get(4)?;
    let status = match ctx.handlers().firmware.load() {
        Some(f) => {
            let status = f(_verification_code, channel);
            if status == nsm_status::SUCCESS {
                info!("firmware download accepted on channel {}", channel);
            }
            status
        }
        None => {
            warn!("firmware request dropped: no firmware handler registered");
            nsm_status::GENERIC_ERROR
        }
    };
    Some(ctx.nsm_reply(nsm_opcode::FIRMWARE, requester, &[status]))
}

fn twoway(ctx: &NodeContext, requester: u8, data: &[u8]) -> Option<Frame> {
    // Never answered on broadcast.
    if !addressed_exactly(ctx, data)? {
        return None;
    }
    let channel = *data.get(2)?;
    let ty = u16::from_le_bytes([*data.get(3)?, *data.get(4)?]);
    let status = match ctx.handlers().twoway.load() {
        Some(f) => f(channel, ty),
        None => {
            warn!("two-way request dropped: no twoway handler registered");
            nsm_status::GENERIC_ERROR
        }
    };
    Some(ctx.nsm_reply(nsm_opcode::TWOWAY, requester, &[status]))
}

fn config_set(ctx: &NodeContext, requester: u8, data: &[u8]) -> Option<Frame> {
    if !addressed_exactly(ctx, data)? {
        return None;
    }
    let key = u16::from_le_bytes([*data.get(2)?, *data.get(3)?]);
    let value = data.get(4..).unwrap_or(&[]);
    let status = match ctx.handlers().config_set.load() {
        Some(f) => f(key, value),
        None => {
            warn!("config set request dropped: no config_set handler registered");
            nsm_status::GENERIC_ERROR
        }
    };
    Some(ctx.nsm_reply(nsm_opcode::CONFIG_SET, requester, &[status]))
}

fn config_get(ctx: &NodeContext, requester: u8, data: &[u8]) -> Option<Frame> {
    if !addressed_exactly(ctx, data)? {
        return None;
    }
    let key = u16::from_le_bytes([*data.get(2)?, *data.get(3)?]);
    let Some(f) = ctx.handlers().config_get.load() else {
        warn!("config get request dropped: no config_get handler registered");
        return Some(ctx.nsm_reply(
            nsm_opcode::CONFIG_GET,
            requester,
            &[nsm_status::GENERIC_ERROR],
        ));
    };
    let mut out = [0u8; MAX_PARAMETER_DATA_LEN];
    let outcome = f(key, &mut out);
    if outcome.status != 0 {
        return Some(ctx.nsm_reply(nsm_opcode::CONFIG_GET, requester, &[outcome.status]));
    }
    let len = (outcome.len as usize).min(out.len());
    let mut tail = [0u8; 1 + MAX_PARAMETER_DATA_LEN];
    tail[1..1 + len].copy_from_slice(&out[..len]);
    Some(ctx.nsm_reply(nsm_opcode::CONFIG_GET, requester, &tail[..1 + len]))
}
