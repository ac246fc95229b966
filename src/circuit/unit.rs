use crate::types::Stream;

/// One separation stage.
///
/// Destinations are `None` when the encoded vector was too short to assign
/// them. Flow accumulators are only meaningful while a simulation runs:
/// `old_*` is the flow entering the unit this iteration, `new_*` the flow
/// collected for the next one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Unit {
    pub conc_dest: Option<usize>,
    pub inter_dest: Option<usize>,
    pub tails_dest: Option<usize>,
    pub visited: bool,
    pub old_flow_g: f64,
    pub old_flow_w: f64,
    pub new_flow_g: f64,
    pub new_flow_w: f64,
}

impl Unit {
    pub fn new(conc_dest: usize, inter_dest: usize, tails_dest: usize) -> Self {
        Self {
            conc_dest: Some(conc_dest),
            inter_dest: Some(inter_dest),
            tails_dest: Some(tails_dest),
            ..Default::default()
        }
    }

    pub fn destination(&self, stream: Stream) -> Option<usize> {
        match stream {
            Stream::Concentrate => self.conc_dest,
            Stream::Intermediate => self.inter_dest,
            Stream::Tailings => self.tails_dest,
        }
    }

    pub fn destinations(&self) -> [Option<usize>; 3] {
        [self.conc_dest, self.inter_dest, self.tails_dest]
    }

    pub fn is_fully_assigned(&self) -> bool {
        self.destinations().iter().all(Option::is_some)
    }

    /// Seed the incoming flow and clear the accumulator.
    pub fn reset_flows(&mut self, flow_g: f64, flow_w: f64) {
        self.old_flow_g = flow_g;
        self.old_flow_w = flow_w;
        self.new_flow_g = 0.0;
        self.new_flow_w = 0.0;
    }

    /// Promote the accumulated flow to the incoming flow for the next iteration.
    pub fn advance(&mut self) {
        self.reset_flows(self.new_flow_g, self.new_flow_w);
    }
}
