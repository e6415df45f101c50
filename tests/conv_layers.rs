//! Convolution driver behavior: reference scenarios, activations,
//! parameter layout, and construction rejection.

mod common;

use common::assert_allclose_f32;
use strider::prelude::*;

#[test]
fn conv1d_adjacent_difference_reference() {
    // filters=1, kernel=2, steps=4, weight [1, -1], bias [0]:
    // pre-activation outputs are [1-2, 2-3, 3-4] = [-1, -1, -1]
    let conv = Conv1d::new(
        Conv1dConfig {
            filters: 1,
            kernel_len: 2,
            steps: 4,
            ..Conv1dConfig::default()
        },
        &[1.0f32, -1.0],
        &[0.0],
    )
    .unwrap();
    assert_eq!(conv.out_len(), 3);
    let mut out = [0.0f32; 3];
    conv.feedforward(&[1.0f32, 2.0, 3.0, 4.0][..], &mut out).unwrap();
    assert_eq!(out, [-1.0, -1.0, -1.0]);
}

#[test]
fn conv1d_relu_clamps_negative_sums() {
    let conv = Conv1d::new(
        Conv1dConfig {
            filters: 1,
            kernel_len: 2,
            steps: 4,
            activation: Activation::Relu,
            ..Conv1dConfig::default()
        },
        &[1.0f32, -1.0],
        &[0.5],
    )
    .unwrap();
    let mut out = [0.0f32; 3];
    conv.feedforward(&[1.0f32, 2.0, 3.0, 4.0][..], &mut out).unwrap();
    // pre-activation: -1 + 0.5 = -0.5 everywhere
    assert_eq!(out, [0.0, 0.0, 0.0]);
}

#[test]
fn conv1d_bias_and_filter_lanes() {
    // two filters with distinct biases: output interleaves filter lanes
    // per step
    let conv = Conv1d::new(
        Conv1dConfig {
            filters: 2,
            kernel_len: 2,
            steps: 4,
            ..Conv1dConfig::default()
        },
        // layout [kernel][channel][filter]: filter 0 sums the window,
        // filter 1 takes the newest element
        &[1.0f32, 0.0, 1.0, 1.0],
        &[10.0, 20.0],
    )
    .unwrap();
    let mut out = [0.0f32; 6];
    conv.feedforward(&[1.0f32, 2.0, 3.0, 4.0][..], &mut out).unwrap();
    assert_eq!(out, [13.0, 22.0, 15.0, 23.0, 17.0, 24.0]);
}

#[test]
fn conv1d_multichannel_weighted_sum() {
    // 2 channels: the window flattens (step, channel) row-major
    let conv = Conv1d::new(
        Conv1dConfig {
            filters: 1,
            kernel_len: 2,
            steps: 3,
            channels: 2,
            ..Conv1dConfig::default()
        },
        // [kernel][channel][filter]: weights 1,2,3,4
        &[1.0f32, 2.0, 3.0, 4.0],
        &[0.0],
    )
    .unwrap();
    let input = [1.0f32, 10.0, 2.0, 20.0, 3.0, 30.0];
    let mut out = [0.0f32; 2];
    conv.feedforward(&input[..], &mut out).unwrap();
    // step 0: 1*1 + 10*2 + 2*3 + 20*4 = 107
    // step 1: 2*1 + 20*2 + 3*3 + 30*4 = 171
    assert_eq!(out, [107.0, 171.0]);
}

#[test]
fn conv2d_multichannel_multifilter() {
    // 2x2 kernel, 2 channels, 2 filters over a 3x3 input; filter 0 sums
    // channel 0, filter 1 sums channel 1
    #[rustfmt::skip]
    let weight = [
        // kernel (0,0): ch0 -> [1, 0], ch1 -> [0, 1]
        1.0f32, 0.0,   0.0, 1.0,
        // kernel (0,1)
        1.0, 0.0,   0.0, 1.0,
        // kernel (1,0)
        1.0, 0.0,   0.0, 1.0,
        // kernel (1,1)
        1.0, 0.0,   0.0, 1.0,
    ];
    let conv = Conv2d::new(
        Conv2dConfig {
            filters: 2,
            kernel: (2, 2),
            rows: 3,
            cols: 3,
            channels: 2,
            ..Conv2dConfig::default()
        },
        &weight,
        &[0.0, 0.0],
    )
    .unwrap();
    // channel 0 is a ramp, channel 1 its negation
    let input: Vec<f32> = (1..=9).flat_map(|i| [i as f32, -(i as f32)]).collect();
    let mut out = [0.0f32; 8];
    conv.feedforward(&input[..], &mut out).unwrap();
    let expected = [12.0f32, -12.0, 16.0, -16.0, 24.0, -24.0, 28.0, -28.0];
    assert_allclose_f32(&out, &expected, 0.0, 0.0, "channel-separating filters");
}

#[test]
fn conv2d_strided_windows() {
    // 5x5 ramp, 2x2 ones kernel, stride 2
    let conv = Conv2d::new(
        Conv2dConfig {
            filters: 1,
            kernel: (2, 2),
            rows: 5,
            cols: 5,
            stride: (2, 2),
            ..Conv2dConfig::default()
        },
        &[1.0f32; 4],
        &[0.0],
    )
    .unwrap();
    let input: Vec<f32> = (0..25).map(|i| i as f32).collect();
    let mut out = [0.0f32; 4];
    conv.feedforward(&input[..], &mut out).unwrap();
    // windows at (0,0), (0,2), (2,0), (2,2)
    assert_eq!(out, [12.0, 20.0, 52.0, 60.0]);
}

#[test]
fn construction_rejects_kernel_not_smaller_than_input() {
    let make = |kernel_len: usize, steps: usize| {
        Conv1d::new(
            Conv1dConfig {
                filters: 1,
                kernel_len,
                steps,
                ..Conv1dConfig::default()
            },
            &vec![1.0f32; kernel_len],
            &[0.0],
        )
    };
    // equal extents must fail; strictly smaller must succeed
    assert!(matches!(make(4, 4), Err(Error::KernelExceedsInput { .. })));
    assert!(make(3, 4).is_ok());
    assert!(matches!(make(5, 4), Err(Error::KernelExceedsInput { .. })));
}

#[test]
fn construction_rejects_zero_extents() {
    let result = Conv2d::new(
        Conv2dConfig {
            filters: 1,
            kernel: (2, 2),
            rows: 5,
            cols: 5,
            channels: 0,
            ..Conv2dConfig::default()
        },
        &[1.0f32; 4],
        &[0.0],
    );
    assert!(matches!(result, Err(Error::InvalidArgument { .. })));
}

#[test]
fn feedforward_rejects_missized_output() {
    let conv = Conv1d::new(
        Conv1dConfig {
            filters: 1,
            kernel_len: 2,
            steps: 4,
            ..Conv1dConfig::default()
        },
        &[1.0f32, -1.0],
        &[0.0],
    )
    .unwrap();
    let mut short = [0.0f32; 2];
    assert!(matches!(
        conv.feedforward(&[1.0f32, 2.0, 3.0, 4.0][..], &mut short),
        Err(Error::OutputLength {
            expected: 3,
            got: 2
        })
    ));
}

#[test]
fn activation_selector_by_name() {
    assert_eq!(Activation::from_name("softplus").unwrap(), Activation::Softplus);
    assert!(matches!(
        Activation::from_name("swish"),
        Err(Error::UnknownActivation { .. })
    ));
}

#[test]
fn softmax_applies_to_completed_output_vector() {
    // a completed 3-step output run through the vector normalizer
    let conv = Conv1d::new(
        Conv1dConfig {
            filters: 1,
            kernel_len: 2,
            steps: 4,
            ..Conv1dConfig::default()
        },
        &[1.0f32, 1.0],
        &[0.0],
    )
    .unwrap();
    let mut out = [0.0f32; 3];
    conv.feedforward(&[1.0f32, 2.0, 3.0, 4.0][..], &mut out).unwrap();
    assert_eq!(out, [3.0, 5.0, 7.0]);
    softmax(&mut out);
    let sum: f32 = out.iter().sum();
    assert!((sum - 1.0).abs() < 1e-6);
    assert_eq!(argmax(&out), 2);
}
