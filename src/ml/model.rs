use burn::{
    nn::{
        attention::{MhaInput, MultiHeadAttention, MultiHeadAttentionConfig},
        Embedding, EmbeddingConfig,
        LayerNorm, LayerNormConfig,
        Linear, LinearConfig,
    },
    prelude::*,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct BertEncoderConfig {
    pub vocab_size: usize,
    #[config(default = 768)]
    pub hidden_size: usize,
    #[config(default = 12)]
    pub num_heads: usize,
    #[config(default = 12)]
    pub num_layers: usize,
    #[config(default = 3072)]
    pub intermediate_size: usize,
    #[config(default = 512)]
    pub max_position_embeddings: usize,
    /// 0 disables token-type embeddings (DistilBERT).
    #[config(default = 2)]
    pub type_vocab_size: usize,
    /// First position id (2 for RoBERTa).
    #[config(default = 0)]
    pub position_offset: usize,
    #[config(default = true)]
    pub use_pooler: bool,
    #[config(default = 1e-12)]
    pub layer_norm_eps: f64,
}

impl BertEncoderConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> BertEncoder<B> {
        let token_embedding    = EmbeddingConfig::new(self.vocab_size, self.hidden_size).init(device);
        let position_embedding = EmbeddingConfig::new(self.max_position_embeddings, self.hidden_size).init(device);
        let token_type_embedding = (self.type_vocab_size > 0)
            .then(|| EmbeddingConfig::new(self.type_vocab_size, self.hidden_size).init(device));
        let embedding_norm = self.layer_norm().init(device);
        let layers: Vec<EncoderBlock<B>> = (0..self.num_layers)
            .map(|_| self.build_encoder_block(device))
            .collect();
        let pooler = self
            .use_pooler
            .then(|| LinearConfig::new(self.hidden_size, self.hidden_size).init(device));
        BertEncoder {
            token_embedding, position_embedding, token_type_embedding,
            embedding_norm, layers, pooler,
            position_offset: self.position_offset,
        }
    }

    /// Longest sequence the position table can hold.
    pub fn max_sequence_len(&self) -> usize {
        self.max_position_embeddings.saturating_sub(self.position_offset)
    }

    fn layer_norm(&self) -> LayerNormConfig {
        LayerNormConfig::new(self.hidden_size).with_epsilon(self.layer_norm_eps)
    }

    fn build_encoder_block<B: Backend>(&self, device: &B::Device) -> EncoderBlock<B> {
        let self_attn   = MultiHeadAttentionConfig::new(self.hidden_size, self.num_heads)
            .with_dropout(0.0)
            .init(device);
        let ffn_linear1 = LinearConfig::new(self.hidden_size, self.intermediate_size).init(device);
        let ffn_linear2 = LinearConfig::new(self.intermediate_size, self.hidden_size).init(device);
        let norm1 = self.layer_norm().init(device);
        let norm2 = self.layer_norm().init(device);
        EncoderBlock { self_attn, ffn_linear1, ffn_linear2, norm1, norm2 }
    }
}

/// Post-norm transformer block, as in BERT.
#[derive(Module, Debug)]
pub struct EncoderBlock<B: Backend> {
    pub self_attn:   MultiHeadAttention<B>,
    pub ffn_linear1: Linear<B>,
    pub ffn_linear2: Linear<B>,
    pub norm1:       LayerNorm<B>,
    pub norm2:       LayerNorm<B>,
}

impl<B: Backend> EncoderBlock<B> {
    pub fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 3> {
        let attn_output = self.self_attn.forward(MhaInput::self_attn(x.clone())).context;
        let x = self.norm1.forward(x + attn_output);
        let ffn_out = self.ffn_linear2.forward(
            burn::tensor::activation::gelu(self.ffn_linear1.forward(x.clone()))
        );
        self.norm2.forward(x + ffn_out)
    }
}

#[derive(Module, Debug)]
pub struct BertEncoder<B: Backend> {
    pub token_embedding:      Embedding<B>,
    pub position_embedding:   Embedding<B>,
    pub token_type_embedding: Option<Embedding<B>>,
    pub embedding_norm:       LayerNorm<B>,
    pub layers:               Vec<EncoderBlock<B>>,
    pub pooler:               Option<Linear<B>>,
    pub position_offset:      usize,
}

/// One raw output group of the model.
pub enum OutputGroup<B: Backend> {
    /// Final layer, [batch, seq_len, hidden]
    LastHidden(Tensor<B, 3>),
    /// tanh(Linear(h_cls)), [batch, hidden]
    Pooled(Tensor<B, 2>),
    /// Embedding output followed by every block output
    HiddenStates(Vec<Tensor<B, 3>>),
}

/// Ordered raw outputs: (last_hidden, [pooled], hidden_states).
pub struct EncoderOutput<B: Backend> {
    pub groups: Vec<OutputGroup<B>>,
}

impl<B: Backend> BertEncoder<B> {
    /// input_ids: [batch, seq_len]
    pub fn forward(&self, input_ids: Tensor<B, 2, Int>) -> EncoderOutput<B> {
        let [batch_size, seq_len] = input_ids.dims();
        let device = input_ids.device();

        let tok_emb = self.token_embedding.forward(input_ids);

        let first = self.position_offset as i64;
        let positions = Tensor::<B, 1, Int>::arange(first..first + seq_len as i64, &device)
            .unsqueeze::<2>()
            .expand([batch_size, seq_len]);
        let mut x = tok_emb + self.position_embedding.forward(positions);

        // Single-segment input: every token type id is 0.
        if let Some(type_embedding) = &self.token_type_embedding {
            let types = Tensor::<B, 2, Int>::zeros([batch_size, seq_len], &device);
            x = x + type_embedding.forward(types);
        }

        let mut x = self.embedding_norm.forward(x);
        let mut hidden_states = Vec::with_capacity(self.layers.len() + 1);
        hidden_states.push(x.clone());
        for layer in &self.layers {
            x = layer.forward(x);
            hidden_states.push(x.clone());
        }

        let mut groups = vec![OutputGroup::LastHidden(x.clone())];
        if let Some(pooler) = &self.pooler {
            let [_, _, hidden] = x.dims();
            let cls = x.slice([0..batch_size, 0..1, 0..hidden]).reshape([batch_size, hidden]);
            groups.push(OutputGroup::Pooled(pooler.forward(cls).tanh()));
        }
        groups.push(OutputGroup::HiddenStates(hidden_states));

        EncoderOutput { groups }
    }
}
