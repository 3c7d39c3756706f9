//! Classifies an inbound frame's identifier into one of the semantic event classes defined by
//! the protocol's 11-bit identifier space (§4.1).

use canfix_common::{
    constants::{ALARM_END, CH_START, NSM_START, PARAMETER_END},
    Id,
};

use crate::handlers::ChannelDirection;

/// The outcome of classifying an inbound frame by its identifier alone.
///
/// Classification never looks at the frame's payload; payload validation (length, decoding) is
/// done by whichever handler the classification routes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    /// Identifier 0: reserved, always dropped.
    Ignore,
    /// A Node Alarm originating from `node`.
    Alarm {
        /// The alarm's originating node, `1..=255`.
        node: u8,
    },
    /// A Parameter publication of type `kind`.
    Parameter {
        /// The parameter's type identifier, `0x100..=0x6DF`.
        kind: Id,
    },
    /// A Node Specific Message.
    NodeSpecific {
        /// The node id the sender stamped into the identifier (`id - NSM_START`). This is the
        /// node that issued the request, used to route the reply; it is *not* the addressee,
        /// which is carried separately in the frame's payload (§4.2).
        requester: u8,
    },
    /// A Communication Channel frame.
    Channel {
        /// Zero-based channel index.
        channel: u8,
        /// Whether this is the request or response half of the channel.
        direction: ChannelDirection,
    },
}

/// Classify an identifier per the table in §4.1.
pub fn classify(id: Id) -> Classification {
    let raw = id.raw();
    if raw == 0 {
        Classification::Ignore
    } else if raw <= ALARM_END {
        Classification::Alarm { node: raw as u8 }
    } else if raw <= PARAMETER_END {
        Classification::Parameter { kind: id }
    } else if raw < CH_START {
        Classification::NodeSpecific {
            requester: (raw - NSM_START) as u8,
        }
    } else {
        let offset = raw - CH_START;
        let direction = if offset % 2 == 0 {
            ChannelDirection::Request
        } else {
            ChannelDirection::Response
        };
        Classification::Channel {
            channel: (offset / 2) as u8,
            direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_ignored() {
        assert_eq!(classify(Id::new(0).unwrap()), Classification::Ignore);
    }

    #[test]
    fn low_ids_are_alarms() {
        assert_eq!(
            classify(Id::new(1).unwrap()),
            Classification::Alarm { node: 1 }
        );
        assert_eq!(
            classify(Id::new(255).unwrap()),
            Classification::Alarm { node: 255 }
        );
    }

    #[test]
    fn mid_range_ids_are_parameters() {
        let id = Id::new(0x184).unwrap();
        assert_eq!(classify(id), Classification::Parameter { kind: id });
        assert_eq!(
            classify(Id::new(0x6DF).unwrap()),
            Classification::Parameter {
                kind: Id::new(0x6DF).unwrap()
            }
        );
    }

    #[test]
    fn nsm_range_carries_the_requester_not_the_addressee() {
        assert_eq!(
            classify(Id::new(0x6E0).unwrap()),
            Classification::NodeSpecific { requester: 0 }
        );
        assert_eq!(
            classify(Id::new(0x703).unwrap()),
            Classification::NodeSpecific { requester: 0x23 }
        );
        assert_eq!(
            classify(Id::new(0x7DF).unwrap()),
            Classification::NodeSpecific { requester: 0xFF }
        );
    }

    #[test]
    fn channel_range_splits_request_and_response() {
        assert_eq!(
            classify(Id::new(0x7E0).unwrap()),
            Classification::Channel {
                channel: 0,
                direction: ChannelDirection::Request
            }
        );
        assert_eq!(
            classify(Id::new(0x7E1).unwrap()),
            Classification::Channel {
                channel: 0,
                direction: ChannelDirection::Response
            }
        );
        assert_eq!(
            classify(Id::new(0x7FF).unwrap()),
            Classification::Channel {
                channel: 15,
                direction: ChannelDirection::Response
            }
        );
    }
}
